/// Upper bound on ticks for one ruler.
pub const MAX_RULER_TICKS: usize = 10_000;

/// Labelled tick drawn above a track lane.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerTick {
    pub seconds: f64,
    pub offset_px: f64,
    pub label: String,
}

/// Ticks every `interval` seconds covering `duration`, positioned at
/// `scale` pixels per second. At most [`MAX_RULER_TICKS`] are returned.
pub fn ruler_ticks(duration: f64, scale: f64, interval: f64) -> Vec<RulerTick> {
    let positive = |value: f64| value.is_finite() && value > 0.0;
    if !positive(duration) || !positive(interval) || !positive(scale) {
        return Vec::new();
    }

    let count = ((duration / interval).ceil() as usize).min(MAX_RULER_TICKS);
    (0..count)
        .map(|index| {
            let seconds = index as f64 * interval;
            RulerTick {
                seconds,
                offset_px: seconds * scale,
                label: format!("{seconds}s"),
            }
        })
        .collect()
}

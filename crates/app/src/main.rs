use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lyric_video_core::{
    drop_time, handle_drop, ruler_ticks, visible_media, AppConfig, AudioSync, Canvas, Compositor,
    EditorState, Interaction, LyricLine, Media, MediaElement, MediaKind, NextFrame, ResizeEdge,
    Result, Timeline, VideoFormat, WaveformBackend,
};

/// Left edge of the media lane in the headless layout, in pixels.
const LANE_LEFT: f64 = 16.0;
use tracing_subscriber::EnvFilter;

fn main() -> lyric_video_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Demo { format, max_frames } => run_demo(config, format, max_frames),
        Commands::Inspect { timeline, at } => run_inspect(&config, &timeline, at),
    }
}

fn run_demo(mut config: AppConfig, format: Option<Format>, max_frames: usize) -> Result<()> {
    if let Some(format) = format {
        config.project = lyric_video_core::ProjectSettings::for_format(format.into());
    }
    tracing::info!(
        width = config.project.width,
        height = config.project.height,
        "starting demo"
    );

    let mut state = EditorState::new(config.project, &config.timeline);
    let song =
        Media::new("song", MediaKind::Audio, "demo://song.wav", "song.wav").with_duration(4.0);
    let cover =
        Media::new("cover", MediaKind::Image, "demo://cover.png", "cover.png").with_duration(2.0);
    state.add_media(song.clone());
    state.add_media(cover.clone());
    state.add_to_timeline(song, Some("media-track-1"), 0.0);

    // Dropped half a second into the lane.
    let header_width = config.timeline.track_header_width;
    let pointer_x = LANE_LEFT + header_width + 0.5 * state.timeline_scale();
    let start = drop_time(pointer_x, LANE_LEFT, header_width, state.timeline_scale());
    let payload = serde_json::to_string(&cover)?;
    handle_drop(&mut state, "media-track-2", &payload, start);
    state.add_lyric_line(LyricLine::new("line-1", "First line", 0.0, 1.5));
    state.add_lyric_line(LyricLine::new("line-2", "Second line", 1.5, 3.0));

    let mut interaction = Interaction::new(&config.timeline);
    let scale = state.timeline_scale();
    interaction.begin_resize(&state, "cover", ResizeEdge::Right, 0.0)?;
    interaction.pointer_moved(&mut state, scale);
    interaction.end();

    let mut audio = AudioSync::new(HeadlessWaveform::default());
    audio.sync_source(state.timeline());
    audio.on_ready();

    let mut compositor = Compositor::new();
    let mut canvas = LogCanvas::default();
    let delta = config.preview.frame_interval();

    state.toggle_playback();
    for frame in 0..max_frames {
        audio.sync_playback(state.is_playing());
        audio.backend_mut().advance(delta);
        state.tick(delta, audio.position());

        let next = compositor.render_frame(
            state.timeline(),
            state.project_settings(),
            state.is_playing(),
            &mut canvas,
        );
        tracing::debug!(
            frame,
            time = state.timeline().current_time,
            draws = canvas.draws.len(),
            "frame rendered"
        );
        if next == NextFrame::Stop {
            break;
        }
    }
    audio.sync_playback(state.is_playing());

    println!(
        "rendered {} frames, playhead {:.3}s of {:.3}s, {} draw calls",
        canvas.frames,
        state.timeline().current_time,
        state.timeline().duration,
        canvas.total_draws
    );
    if let Some(message) = audio.error_message() {
        println!("audio: {message}");
    }
    Ok(())
}

fn run_inspect(config: &AppConfig, path: &Path, at: Option<f64>) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let mut timeline: Timeline = serde_json::from_str(&raw)?;
    timeline.recompute_durations();
    tracing::info!(?path, tracks = timeline.tracks.len(), "loaded timeline");

    println!("timeline {} duration {:.3}s", timeline.id, timeline.duration);
    for track in &timeline.tracks {
        println!(
            "  {} ({:?}) {} items, duration {:.3}s",
            track.id,
            track.kind,
            track.items.len(),
            track.duration
        );
        for item in &track.items {
            println!(
                "    {} [{:.3}, {:.3}) {}",
                item.id(),
                item.start_time(),
                item.end_time(),
                item.label()
            );
        }
    }

    let ticks: Vec<String> = ruler_ticks(
        timeline.duration,
        config.timeline.scale,
        config.timeline.ruler_interval,
    )
    .into_iter()
    .map(|tick| format!("{}@{}px", tick.label, tick.offset_px))
    .collect();
    println!("ruler: {}", ticks.join(" "));

    let time = at.unwrap_or(timeline.current_time);
    let visible: Vec<&str> = visible_media(&timeline, time)
        .into_iter()
        .map(|placed| placed.media.id.as_str())
        .collect();
    println!("visible at {time:.3}s: {visible:?}");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Canvas that only counts what would have been drawn.
#[derive(Debug, Default)]
struct LogCanvas {
    size: (u32, u32),
    frames: usize,
    draws: Vec<String>,
    total_draws: usize,
}

impl Canvas for LogCanvas {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn clear(&mut self) {
        self.frames += 1;
        self.draws.clear();
    }

    fn draw(&mut self, element: &MediaElement, width: u32, height: u32) {
        tracing::trace!(item = %element.item_id, width, height, "draw");
        self.draws.push(element.item_id.clone());
        self.total_draws += 1;
    }
}

/// Waveform stand-in whose position advances with the demo's frame clock.
#[derive(Debug, Default)]
struct HeadlessWaveform {
    playing: bool,
    position: f64,
}

impl HeadlessWaveform {
    fn advance(&mut self, delta: f64) {
        if self.playing {
            self.position += delta;
        }
    }
}

impl WaveformBackend for HeadlessWaveform {
    fn decode(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn load(&mut self, url: &str) -> Result<()> {
        tracing::info!(url, "waveform source loaded");
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        self.position = seconds;
        Ok(())
    }

    fn position(&self) -> Option<f64> {
        Some(self.position)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Lyric video editor core driver", long_about = None)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a sample project and play it through the headless compositor.
    Demo {
        /// Output format overriding the configuration.
        #[arg(long, value_enum)]
        format: Option<Format>,
        /// Upper bound on rendered frames.
        #[arg(long, default_value_t = 600)]
        max_frames: usize,
    },
    /// Print durations and the visible set of a timeline JSON file.
    Inspect {
        timeline: PathBuf,
        /// Playhead to evaluate, defaults to the file's current time.
        #[arg(long)]
        at: Option<f64>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Landscape,
    Portrait,
    Square,
}

impl From<Format> for VideoFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Landscape => VideoFormat::Landscape,
            Format::Portrait => VideoFormat::Portrait,
            Format::Square => VideoFormat::Square,
        }
    }
}

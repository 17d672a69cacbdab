//! Pointer gestures that move and resize timeline items.
//!
//! A gesture is an explicit [`GestureSession`] created on pointer-down and
//! discarded on pointer-up. Only one session exists at a time.

mod drop_target;

pub use drop_target::{drop_time, handle_drop, parse_drop_payload};

use crate::{EditorState, LyricVideoError, Result, TimelineConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Dragging,
    Resizing(ResizeEdge),
}

/// Window requested for an item by one pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTimeChange {
    pub id: String,
    pub start_time: f64,
    pub duration: f64,
}

/// State captured at pointer-down. Every move is computed from this anchor,
/// not from the previous move.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub mode: GestureMode,
    pub item_id: String,
    pub anchor_x: f64,
    pub original_start: f64,
    pub original_duration: f64,
    /// Pixels per second at gesture start.
    pub scale: f64,
    pub min_duration: f64,
}

impl GestureSession {
    pub fn update(&self, pointer_x: f64) -> ItemTimeChange {
        let delta = if self.scale > 0.0 {
            (pointer_x - self.anchor_x) / self.scale
        } else {
            0.0
        };

        let (start_time, duration) = match self.mode {
            GestureMode::Dragging => {
                ((self.original_start + delta).max(0.0), self.original_duration)
            }
            GestureMode::Resizing(ResizeEdge::Right) => (
                self.original_start,
                (self.original_duration + delta).max(self.min_duration),
            ),
            GestureMode::Resizing(ResizeEdge::Left) => {
                let latest_start = self.original_start + self.original_duration - self.min_duration;
                let start = (self.original_start + delta).min(latest_start).max(0.0);
                (start, self.original_duration - (start - self.original_start))
            }
        };

        ItemTimeChange {
            id: self.item_id.clone(),
            start_time,
            duration,
        }
    }
}

/// Holds the exclusive pointer capture of the active gesture, if any.
#[derive(Debug, Clone)]
pub struct Interaction {
    session: Option<GestureSession>,
    min_duration: f64,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl Interaction {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            session: None,
            min_duration: config.min_item_duration,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn begin_drag(&mut self, state: &EditorState, item_id: &str, pointer_x: f64) -> Result<()> {
        self.begin(state, item_id, GestureMode::Dragging, pointer_x)
    }

    pub fn begin_resize(
        &mut self,
        state: &EditorState,
        item_id: &str,
        edge: ResizeEdge,
        pointer_x: f64,
    ) -> Result<()> {
        self.begin(state, item_id, GestureMode::Resizing(edge), pointer_x)
    }

    /// Applies the move to the editor state. Moves outside a gesture are
    /// ignored.
    pub fn pointer_moved(
        &mut self,
        state: &mut EditorState,
        pointer_x: f64,
    ) -> Option<ItemTimeChange> {
        let change = self.session.as_ref()?.update(pointer_x);
        state.set_item_time(&change.id, change.start_time, change.duration);
        Some(change)
    }

    /// Releases the pointer capture.
    pub fn end(&mut self) -> Option<GestureSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            tracing::debug!(item = %session.item_id, mode = ?session.mode, "gesture ended");
        }
        session
    }

    fn begin(
        &mut self,
        state: &EditorState,
        item_id: &str,
        mode: GestureMode,
        pointer_x: f64,
    ) -> Result<()> {
        if let Some(active) = &self.session {
            return Err(LyricVideoError::GestureInProgress(active.item_id.clone()));
        }

        let item = state
            .timeline()
            .find_item(item_id)
            .ok_or(LyricVideoError::InvalidInput("gesture target is not on the timeline"))?;

        tracing::debug!(item = item_id, ?mode, "gesture started");
        self.session = Some(GestureSession {
            mode,
            item_id: item_id.to_string(),
            anchor_x: pointer_x,
            original_start: item.start_time(),
            original_duration: item.effective_duration(),
            scale: state.timeline_scale(),
            min_duration: self.min_duration,
        });
        Ok(())
    }
}

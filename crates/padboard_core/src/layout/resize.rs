//! Resize constraint enforcement.
//!
//! # Responsibility
//! - Translate a compass-handle pointer delta into a constrained rectangle.
//!
//! # Invariants
//! - `w >= MIN_WIDTH` and `h >= MIN_HEIGHT` after every frame.
//! - When the minimum is hit on an origin-moving edge (`n`/`w`), the
//!   opposite edge stays fixed.
//! - No collision avoidance during resize; only size clamping.

use crate::geometry::{Rect, Viewport, MIN_HEIGHT, MIN_WIDTH};
use crate::model::note::NoteId;
use log::debug;

/// The eight compass resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeDirection {
    /// Parses a handle token such as `"ne"` or `"s"`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "n" => Some(Self::N),
            "s" => Some(Self::S),
            "e" => Some(Self::E),
            "w" => Some(Self::W),
            "ne" => Some(Self::Ne),
            "nw" => Some(Self::Nw),
            "se" => Some(Self::Se),
            "sw" => Some(Self::Sw),
            _ => None,
        }
    }

    fn north(&self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    fn south(&self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    fn east(&self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    fn west(&self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

/// Immutable state captured when a resize begins.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    note_id: NoteId,
    direction: ResizeDirection,
    start_x: f64,
    start_y: f64,
    initial: Rect,
    viewport: Viewport,
}

impl ResizeSession {
    pub fn begin(
        note_id: NoteId,
        note_rect: Rect,
        direction: ResizeDirection,
        pointer: (f64, f64),
        viewport: Viewport,
    ) -> Self {
        debug!(
            "event=resize_start module=layout status=ok note={note_id} direction={direction:?}"
        );
        Self {
            note_id,
            direction,
            start_x: pointer.0,
            start_y: pointer.1,
            initial: note_rect,
            viewport,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Viewport captured at resize start, used for the final re-anchor.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resolves one frame from the latest pointer coordinates.
    pub fn frame(&self, pointer: (f64, f64)) -> Rect {
        let dx = pointer.0 - self.start_x;
        let dy = pointer.1 - self.start_y;
        let dir = self.direction;

        let initial_w = self.initial.width();
        let initial_h = self.initial.height();
        let mut width = initial_w;
        let mut height = initial_h;
        let mut left = self.initial.left;
        let mut top = self.initial.top;

        if dir.north() {
            height = initial_h - dy;
            top = self.initial.top + dy;
        }
        if dir.south() {
            height = initial_h + dy;
        }
        if dir.west() {
            width = initial_w - dx;
            left = self.initial.left + dx;
        }
        if dir.east() {
            width = initial_w + dx;
        }

        if width < MIN_WIDTH {
            if dir.west() {
                left = self.initial.left + (initial_w - MIN_WIDTH);
            }
            width = MIN_WIDTH;
        }
        if height < MIN_HEIGHT {
            if dir.north() {
                top = self.initial.top + (initial_h - MIN_HEIGHT);
            }
            height = MIN_HEIGHT;
        }

        Rect::from_origin(left, top, width, height)
    }
}

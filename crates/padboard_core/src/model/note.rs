//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note summary record and its anchor semantics.
//! - Convert between the percent+anchor representation and pixel rects.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - Position is always expressed relative to the active anchor pair.
//! - While minimized, `h` keeps the pre-minimize height for restoration;
//!   the on-screen rect uses the collapsed header height instead.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::geometry::{self, AnchorX, AnchorY, Axis, Rect, Viewport, COLLAPSED_HEIGHT};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Font size preference applied to every note body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Big,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Big => "big",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "big" => Some(Self::Big),
            _ => None,
        }
    }
}

/// Persisted note summary.
///
/// Field names keep the persisted-schema spelling so stored board metadata
/// round-trips unchanged. Text content is stored separately, keyed
/// by `id`, so geometry changes never rewrite note bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Percent of viewport width, measured from `anchor_x`.
    #[serde(rename = "posX")]
    pub pos_x: f64,
    /// Percent of viewport height, measured from `anchor_y`.
    #[serde(rename = "posY")]
    pub pos_y: f64,
    /// Size in absolute pixels.
    pub w: f64,
    pub h: f64,
    /// Stacking order; derives from a shared monotonic counter.
    #[serde(rename = "zIndex")]
    pub z_index: i64,
    pub minimized: bool,
    #[serde(rename = "anchorX")]
    pub anchor_x: AnchorX,
    #[serde(rename = "anchorY")]
    pub anchor_y: AnchorY,
    /// Optional watermark glyph, immutable after creation.
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Note {
    /// Creates a note from a freshly spawned pixel rectangle.
    ///
    /// Spawn placement always anchors left/top; the first interaction that
    /// moves the note recomputes the optimal anchors.
    pub fn spawned(rect: Rect, viewport: Viewport, z_index: i64, symbol: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pos_x: geometry::px_to_percent(rect.left, Axis::X, viewport),
            pos_y: geometry::px_to_percent(rect.top, Axis::Y, viewport),
            w: rect.width(),
            h: rect.height(),
            z_index,
            minimized: false,
            anchor_x: AnchorX::Left,
            anchor_y: AnchorY::Top,
            symbol,
        }
    }

    /// Resolves the on-screen pixel rectangle for the current viewport.
    pub fn resolve_rect(&self, viewport: Viewport) -> Rect {
        let height = if self.minimized {
            COLLAPSED_HEIGHT
        } else {
            self.h
        };
        let left = match self.anchor_x {
            AnchorX::Left => geometry::percent_to_px(self.pos_x, Axis::X, viewport),
            AnchorX::Right => {
                viewport.width - geometry::percent_to_px(self.pos_x, Axis::X, viewport) - self.w
            }
        };
        let top = match self.anchor_y {
            AnchorY::Top => geometry::percent_to_px(self.pos_y, Axis::Y, viewport),
            AnchorY::Bottom => {
                viewport.height - geometry::percent_to_px(self.pos_y, Axis::Y, viewport) - height
            }
        };
        Rect::from_origin(left, top, self.w, height)
    }

    /// Commits a final pixel rectangle back into percent+anchor form.
    ///
    /// Recomputes the optimal anchor pair from the rectangle, then measures
    /// the position from the chosen edges. Size fields are left untouched so
    /// dragging a minimized note never overwrites its stored full height.
    pub fn reanchor_to(&mut self, rect: Rect, viewport: Viewport) {
        let (anchor_x, anchor_y) = geometry::optimal_anchor(rect, viewport);
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self.pos_x = match anchor_x {
            AnchorX::Left => geometry::px_to_percent(rect.left, Axis::X, viewport),
            AnchorX::Right => {
                geometry::px_to_percent(viewport.width - rect.right, Axis::X, viewport)
            }
        };
        self.pos_y = match anchor_y {
            AnchorY::Top => geometry::px_to_percent(rect.top, Axis::Y, viewport),
            AnchorY::Bottom => {
                geometry::px_to_percent(viewport.height - rect.bottom, Axis::Y, viewport)
            }
        };
    }

    /// Commits both size and position, for resize end and restore commit.
    pub fn commit_rect(&mut self, rect: Rect, viewport: Viewport) {
        self.w = rect.width();
        self.h = rect.height();
        self.reanchor_to(rect, viewport);
    }
}

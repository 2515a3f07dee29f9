//! Pure viewport geometry for note layout.
//!
//! # Responsibility
//! - Axis-aligned rectangle math and margin collision tests.
//! - Percent <-> pixel conversion relative to a viewport.
//! - Optimal anchor choice for responsive repositioning.
//!
//! # Invariants
//! - Every function here is pure; no viewport queries, no side effects.
//! - `px_to_percent` rounds to 2 decimal places so persisted positions stay
//!   compact and deterministic.
//!
//! # See also
//! - docs/architecture/layout-physics.md

use serde::{Deserialize, Serialize};

/// Minimum clearance kept between notes and between notes and the viewport
/// edge, in pixels.
pub const FORCE_FIELD: f64 = 16.0;
/// Minimum note width in pixels.
pub const MIN_WIDTH: f64 = 200.0;
/// Minimum note height in pixels (ignored while minimized).
pub const MIN_HEIGHT: f64 = 140.0;
/// Maximum edge gap that still snaps to exactly `FORCE_FIELD`.
pub const SNAP_THRESHOLD: f64 = 32.0;
/// Projection overlap lane within which edge snapping considers a target.
pub const SNAP_LANE: f64 = 60.0;
/// Header-strip height of a minimized note.
pub const COLLAPSED_HEIGHT: f64 = 28.0;
/// Default spawn size for a regular note.
pub const DEFAULT_NOTE_W: f64 = 250.0;
pub const DEFAULT_NOTE_H: f64 = 200.0;
/// Rare notes spawn slightly taller to fit their content.
pub const RARE_NOTE_H: f64 = 250.0;
/// Spiral placement search steps and attempt budget.
pub const SPAWN_ANGLE_STEP: f64 = 0.5;
pub const SPAWN_RADIUS_STEP: f64 = 60.0;
pub const SPAWN_MAX_ATTEMPTS: u32 = 50;
/// Floor for the stacking-order counter.
pub const BASE_Z_INDEX: i64 = 1000;
/// Idle window for coalescing persistence writes.
pub const DEBOUNCE_MS: u64 = 500;
/// Two header clicks within this window toggle minimize.
pub const DOUBLE_CLICK_MS: u64 = 300;
/// Probability that a fresh note draws from the rare-note pool.
pub const RARE_NOTE_PROBABILITY: f64 = 0.18;
/// Duplicated notes shift by this much on both percent axes.
pub const DUPLICATE_OFFSET_PERCENT: f64 = 2.0;
/// Anchors flip to the far edge once a rectangle's near edge passes this
/// fraction of the viewport extent.
const ANCHOR_FLIP_RATIO: f64 = 0.70;

/// Viewport extent in pixels, queried by the host at interaction start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Conversion axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Horizontal viewport edge a note position is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorX {
    Left,
    Right,
}

/// Vertical viewport edge a note position is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorY {
    Top,
    Bottom,
}

/// Axis-aligned rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Clamps the origin so the rectangle stays inside the viewport with
    /// `margin` clearance on every side. Size is preserved.
    ///
    /// When the rectangle is larger than the clamp window the origin pins to
    /// the margin, matching the greedy min/max order used everywhere else.
    pub fn clamped_to(&self, viewport: Viewport, margin: f64) -> Self {
        let left = clamp_origin(self.left, self.width(), viewport.width, margin);
        let top = clamp_origin(self.top, self.height(), viewport.height, margin);
        Self::from_origin(left, top, self.width(), self.height())
    }
}

fn clamp_origin(value: f64, size: f64, extent: f64, margin: f64) -> f64 {
    value.min(extent - size - margin).max(margin)
}

/// Margin-expanded separation test.
///
/// True unless the rectangles, each conceptually grown by `margin`, are
/// fully separated along one axis. Symmetric in its rectangle arguments.
pub fn rects_collide(a: Rect, b: Rect, margin: f64) -> bool {
    !(a.right + margin <= b.left
        || a.left >= b.right + margin
        || a.bottom + margin <= b.top
        || a.top >= b.bottom + margin)
}

/// Converts a pixel offset into a viewport percentage, rounded to 2 decimal
/// places.
pub fn px_to_percent(px: f64, axis: Axis, viewport: Viewport) -> f64 {
    let percent = (px / viewport.extent(axis)) * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Converts a viewport percentage back into pixels.
pub fn percent_to_px(percent: f64, axis: Axis, viewport: Viewport) -> f64 {
    (percent / 100.0) * viewport.extent(axis)
}

/// Picks the viewport corner a rectangle should anchor to.
///
/// A rectangle anchors `right`/`bottom` once its near edge sits past 70% of
/// the viewport extent, so notes near an edge track that edge under window
/// resize instead of drifting.
pub fn optimal_anchor(rect: Rect, viewport: Viewport) -> (AnchorX, AnchorY) {
    let x = if rect.left > viewport.width * ANCHOR_FLIP_RATIO {
        AnchorX::Right
    } else {
        AnchorX::Left
    };
    let y = if rect.top > viewport.height * ANCHOR_FLIP_RATIO {
        AnchorY::Bottom
    } else {
        AnchorY::Top
    };
    (x, y)
}

//! Drag-time collision resolution, edge snapping and cluster translation.
//!
//! # Responsibility
//! - Capture the immutable per-drag state at drag start.
//! - Resolve one frame of drag geometry from the latest pointer position.
//!
//! # Invariants
//! - Snap targets are static for the whole drag and iterate in capture
//!   order; the push-apart pass is a greedy sequential resolver, not a
//!   global solver.
//! - On equal push magnitudes the horizontal axis wins (`<=`).
//! - Cluster followers translate rigidly with the anchor note and are not
//!   separately collision-tested during the live frame.
//!
//! # See also
//! - docs/architecture/layout-physics.md

use crate::geometry::{
    rects_collide, Rect, Viewport, FORCE_FIELD, SNAP_LANE, SNAP_THRESHOLD,
};
use crate::model::note::NoteId;
use log::debug;

/// A selected follower's rigid offset from the drag anchor note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOffset {
    pub id: NoteId,
    /// Top-left delta relative to the anchor note's top-left at drag start.
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub height: f64,
}

/// One resolved frame of drag geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    /// Final rectangle for the dragged (anchor) note.
    pub anchor: Rect,
    /// Final rectangles for cluster followers, offsets preserved.
    pub followers: Vec<(NoteId, Rect)>,
}

/// Immutable state captured when a drag begins.
#[derive(Debug, Clone)]
pub struct DragSession {
    note_id: NoteId,
    /// Pointer offset inside the dragged rectangle at drag start.
    grab_x: f64,
    grab_y: f64,
    width: f64,
    height: f64,
    snap_targets: Vec<Rect>,
    cluster: Vec<ClusterOffset>,
    viewport: Viewport,
}

impl DragSession {
    /// Captures drag state.
    ///
    /// `snap_targets` must exclude the dragged note and every note in the
    /// current multi-selection, in stable (insertion) order. `cluster`
    /// holds the other selected notes' offsets; empty for a solo drag.
    pub fn begin(
        note_id: NoteId,
        note_rect: Rect,
        pointer: (f64, f64),
        snap_targets: Vec<Rect>,
        cluster: Vec<ClusterOffset>,
        viewport: Viewport,
    ) -> Self {
        debug!(
            "event=drag_start module=layout status=ok note={note_id} targets={} cluster={}",
            snap_targets.len(),
            cluster.len()
        );
        Self {
            note_id,
            grab_x: pointer.0 - note_rect.left,
            grab_y: pointer.1 - note_rect.top,
            width: note_rect.width(),
            height: note_rect.height(),
            snap_targets,
            cluster,
            viewport,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn cluster(&self) -> &[ClusterOffset] {
        &self.cluster
    }

    /// Viewport captured at drag start, used for the final re-anchor.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resolves one frame from the latest pointer coordinates.
    ///
    /// Pipeline: clamp into the viewport, push apart from every colliding
    /// snap target (re-clamping after each), then snap near edges to sit
    /// exactly one force field away from aligned targets.
    pub fn frame(&self, pointer: (f64, f64)) -> DragFrame {
        let vw = self.viewport.width;
        let vh = self.viewport.height;
        let force = FORCE_FIELD;

        let mut left = pointer.0 - self.grab_x;
        let mut top = pointer.1 - self.grab_y;
        left = left.min(vw - self.width - force).max(force);
        top = top.min(vh - self.height - force).max(force);

        let mut candidate = Rect::from_origin(left, top, self.width, self.height);

        for target in &self.snap_targets {
            if !rects_collide(candidate, *target, force) {
                continue;
            }
            let overlap_left = (candidate.right + force) - target.left;
            let overlap_right = (target.right + force) - candidate.left;
            let overlap_top = (candidate.bottom + force) - target.top;
            let overlap_bottom = (target.bottom + force) - candidate.top;

            let push_x = if overlap_left < overlap_right {
                -overlap_left
            } else {
                overlap_right
            };
            let push_y = if overlap_top < overlap_bottom {
                -overlap_top
            } else {
                overlap_bottom
            };

            // Tie goes to the horizontal axis.
            if push_x.abs() <= push_y.abs() {
                left += push_x;
            } else {
                top += push_y;
            }

            left = left.min(vw - self.width - force).max(force);
            top = top.min(vh - self.height - force).max(force);
            candidate = Rect::from_origin(left, top, self.width, self.height);
        }

        for target in &self.snap_targets {
            let in_vertical_lane = top < target.bottom + SNAP_LANE
                && top + self.height > target.top - SNAP_LANE;
            let in_horizontal_lane = left < target.right + SNAP_LANE
                && left + self.width > target.left - SNAP_LANE;

            if in_vertical_lane {
                if ((target.left - force) - (left + self.width)).abs() < SNAP_THRESHOLD {
                    left = target.left - self.width - force;
                } else if ((target.right + force) - left).abs() < SNAP_THRESHOLD {
                    left = target.right + force;
                }
            }
            if in_horizontal_lane {
                if ((target.top - force) - (top + self.height)).abs() < SNAP_THRESHOLD {
                    top = target.top - self.height - force;
                } else if ((target.bottom + force) - top).abs() < SNAP_THRESHOLD {
                    top = target.bottom + force;
                }
            }
        }

        let anchor = Rect::from_origin(left, top, self.width, self.height);
        let followers = self
            .cluster
            .iter()
            .map(|offset| {
                (
                    offset.id,
                    Rect::from_origin(
                        left + offset.dx,
                        top + offset.dy,
                        offset.width,
                        offset.height,
                    ),
                )
            })
            .collect();

        DragFrame { anchor, followers }
    }
}

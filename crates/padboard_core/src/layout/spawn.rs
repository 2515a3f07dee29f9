//! Spawn placement search.
//!
//! # Responsibility
//! - Find a collision-free rectangle for a new note, deterministically.
//!
//! # Invariants
//! - Terminates within `SPAWN_MAX_ATTEMPTS` iterations.
//! - The returned rectangle always lies inside the viewport minus the
//!   force-field margin, collision-free or not.

use crate::geometry::{
    rects_collide, Rect, Viewport, FORCE_FIELD, SPAWN_ANGLE_STEP, SPAWN_MAX_ATTEMPTS,
    SPAWN_RADIUS_STEP,
};
use log::debug;

/// Searches for a non-colliding placement for a `width`x`height` rectangle.
///
/// Starts centered on the viewport; each failed attempt advances along an
/// outward spiral (angle += 0.5 rad, radius += 60px). After the attempt
/// budget the last candidate is accepted as-is, so a crowded board degrades
/// to an overlapping spawn instead of failing.
pub fn find_spawn_rect(
    width: f64,
    height: f64,
    existing: &[Rect],
    viewport: Viewport,
) -> Rect {
    let base_x = (viewport.width - width) / 2.0;
    let base_y = (viewport.height - height) / 2.0;

    let mut left = base_x;
    let mut top = base_y;
    let mut angle = 0.0_f64;
    let mut radius = 0.0_f64;
    let mut attempts = 0;

    while attempts < SPAWN_MAX_ATTEMPTS {
        let candidate = Rect::from_origin(left, top, width, height);
        let collides = existing
            .iter()
            .any(|rect| rects_collide(candidate, *rect, FORCE_FIELD));
        if !collides {
            break;
        }
        angle += SPAWN_ANGLE_STEP;
        radius += SPAWN_RADIUS_STEP;
        left = base_x + angle.cos() * radius;
        top = base_y + angle.sin() * radius;
        attempts += 1;
    }

    if attempts > 0 {
        debug!(
            "event=spawn_search module=layout status=ok attempts={attempts} budget_exhausted={}",
            attempts == SPAWN_MAX_ATTEMPTS
        );
    }

    Rect::from_origin(left, top, width, height).clamped_to(viewport, FORCE_FIELD)
}

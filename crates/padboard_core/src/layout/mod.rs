//! Note layout physics engine.
//!
//! # Responsibility
//! - Spawn placement search with collision avoidance.
//! - Per-frame drag resolution: clamp, push-apart, edge snapping, clusters.
//! - Resize constraint enforcement.
//!
//! # Invariants
//! - Everything here is pure geometry: rectangles in, rectangles out. The
//!   service layer owns the store mutations and persistence.
//! - Snap-target iteration order is capture order and never re-sorted.
//!
//! # See also
//! - docs/architecture/layout-physics.md

pub mod drag;
pub mod resize;
pub mod spawn;

pub use drag::{ClusterOffset, DragFrame, DragSession};
pub use resize::{ResizeDirection, ResizeSession};
pub use spawn::find_spawn_rect;

//! padboard_core: sticky-note board engine.
//!
//! # Responsibility
//! - Own the note model, selection store and layout physics (spawn, drag,
//!   snap, resize, re-anchor).
//! - Persist board state through the repository layer (SQLite).
//! - Render the animated ASCII backdrop.
//!
//! # Invariants
//! - Core stays UI-free: hosts drive pointer/frame events and paint results.
//! - All mutations flow through [`service::board_service::BoardService`].
//!
//! # See also
//! - `service/board_service.rs` for the top-level API surface.

pub mod backdrop;
pub mod db;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod store;

pub use backdrop::Backdrop;
pub use db::{open_db, open_db_in_memory, DbError};
pub use geometry::{Rect, Viewport};
pub use model::note::{FontSize, Note, NoteId};
pub use model::rare_note::RareNote;
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use service::board_service::{BoardError, BoardService, ClickOutcome};
pub use store::NoteStore;

/// Returns the core library version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

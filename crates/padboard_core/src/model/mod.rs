//! Domain model for board notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the persisted summary shape stable across geometry churn.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Text content lives outside the summary record, keyed per note.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
pub mod rare_note;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the board persistence contract the core requires.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Read paths degrade to safe defaults (empty board, empty text) instead
//!   of surfacing parse failures; only storage transport errors propagate.

pub mod board_repo;

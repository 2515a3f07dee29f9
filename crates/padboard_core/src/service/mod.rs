//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, layout engine and repository into board-level APIs.
//! - Keep host/UI layers decoupled from storage and physics details.

pub mod board_service;

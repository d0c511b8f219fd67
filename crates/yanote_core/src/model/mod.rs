//! Domain model for notes and their authors.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own field-level validation shared by forms and repositories.
//!
//! # Invariants
//! - Every note and user is identified by a stable UUID.
//! - A note's author is `None` only after its account was deleted.

pub mod note;
pub mod user;

//! Business rules applied by the note service.
//!
//! # Responsibility
//! - Slug derivation/validation (`slug`).
//! - Ownership-based authorization (`access`).
//!
//! # Invariants
//! - Policies are pure functions: no storage access, no logging.

pub mod access;
pub mod slug;

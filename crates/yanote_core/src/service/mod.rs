//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate policies and repository calls into use-case level APIs.
//! - Keep the web and CLI layers decoupled from storage details.

pub mod note_service;
pub mod user_service;

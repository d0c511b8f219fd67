//! Core domain logic for YaNote.
//! This crate is the single source of truth for note ownership and slug invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_console_logging, init_logging, logging_status};
pub use model::note::{
    Note, NoteField, NoteId, NoteInput, NoteValidationError, DEFAULT_NOTE_TITLE, TITLE_MAX_CHARS,
};
pub use model::user::{User, UserId};
pub use policy::access::{
    authorize, can_delete, can_edit, can_list, can_view, filter_visible, NoteAction,
};
pub use policy::slug::{
    derive_slug, resolve_slug, validate_format, validate_unique, SlugError, SLUG_MAX_CHARS,
    SLUG_WARNING,
};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::user_service::{UserService, UserServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

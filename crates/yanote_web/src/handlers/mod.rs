//! Route handlers.

pub mod forms;
pub mod notes;
pub mod pages;

use crate::error::WebError;
use rusqlite::Connection;
use yanote_core::{NoteService, SqliteNoteRepository};

/// Where successful writes redirect to.
pub const DONE_PATH: &str = "/done/";

fn note_service(conn: &Connection) -> Result<NoteService<SqliteNoteRepository<'_>>, WebError> {
    Ok(NoteService::new(SqliteNoteRepository::try_new(conn)?))
}

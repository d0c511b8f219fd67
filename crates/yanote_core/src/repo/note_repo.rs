//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide slug-addressed note persistence for the note service.
//! - Map storage-level slug collisions to `RepoError::DuplicateSlug`.
//!
//! # Invariants
//! - Each write is a single statement, so it is applied fully or not at all.
//! - Author listings are ordered by creation (`created_at ASC, rowid ASC`).
//! - Read paths reject invalid persisted state instead of masking it.

use super::{ensure_schema_current, is_unique_violation, parse_uuid, RepoError, RepoResult};
use crate::model::note::{Note, NoteId};
use crate::model::user::UserId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    text,
    slug,
    author_uuid,
    created_at
FROM notes";

const SLUG_COLUMN: &str = "notes.slug";

/// Repository interface for note persistence.
///
/// Implementations must enforce slug uniqueness themselves (the SQLite one
/// relies on `UNIQUE(slug)`), so concurrent writers cannot both succeed.
pub trait NoteRepository {
    /// Inserts a new note and returns its stable id.
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title, text and slug of an existing note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Loads one note by slug.
    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Note>>;
    /// Lists all notes of one author in creation order.
    fn find_all_by_author(&self, author: UserId) -> RepoResult<Vec<Note>>;
    /// Returns the stored slugs equal to `slug`, ignoring note `excluding`.
    fn conflicting_slugs(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> RepoResult<BTreeSet<String>>;
    /// Hard-deletes one note.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Counts all stored notes, regardless of author.
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_current(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        let result = self.conn.execute(
            "INSERT INTO notes (
                uuid,
                title,
                text,
                slug,
                author_uuid,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.text.as_str(),
                note.slug.as_str(),
                note.author.map(|author| author.to_string()),
                note.created_at,
            ],
        );

        match result {
            Ok(_) => Ok(note.id),
            Err(err) if is_unique_violation(&err, SLUG_COLUMN) => {
                Err(RepoError::DuplicateSlug(note.slug.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let result = self.conn.execute(
            "UPDATE notes
             SET
                title = ?2,
                text = ?3,
                slug = ?4
             WHERE uuid = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.text.as_str(),
                note.slug.as_str(),
            ],
        );

        match result {
            Ok(0) => Err(RepoError::NotFound(note.id)),
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err, SLUG_COLUMN) => {
                Err(RepoError::DuplicateSlug(note.slug.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn find_all_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE author_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn conflicting_slugs(
        &self,
        slug: &str,
        excluding: Option<NoteId>,
    ) -> RepoResult<BTreeSet<String>> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT slug
                 FROM notes
                 WHERE slug = ?1
                   AND (?2 IS NULL OR uuid <> ?2);",
                params![slug, excluding.map(|id| id.to_string())],
                |row| row.get(0),
            )
            .optional()?;
        Ok(existing.into_iter().collect())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "notes.uuid")?;
    let author = match row.get::<_, Option<String>>("author_uuid")? {
        Some(value) => Some(parse_uuid(&value, "notes.author_uuid")?),
        None => None,
    };

    let note = Note {
        id,
        title: row.get("title")?,
        text: row.get("text")?,
        slug: row.get("slug")?,
        author,
        created_at: row.get("created_at")?,
    };
    note.validate()
        .map_err(|err| RepoError::InvalidData(format!("note `{uuid_text}`: {err}")))?;
    Ok(note)
}

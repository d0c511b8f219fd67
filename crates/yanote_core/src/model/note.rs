//! Note domain model and form input.
//!
//! # Responsibility
//! - Define the persisted note record and the user-submitted form shape.
//! - Validate titles and explicit slugs before any persistence attempt.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` is non-blank and at most `TITLE_MAX_CHARS` characters.
//! - A persisted `slug` is non-empty and matches the slug format.

use crate::model::user::UserId;
use crate::policy::slug::{validate_format, SlugError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a note.
pub type NoteId = Uuid;

/// Maximum title length, counted in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Storage default used when a row is written without a title.
pub const DEFAULT_NOTE_TITLE: &str = "Название заметки";

const REQUIRED_FIELD_MESSAGE: &str = "Обязательное поле.";

/// One user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// `None` once the author's account has been deleted.
    pub author: Option<UserId>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a note owned by `author` with a generated stable ID.
    pub fn new(
        author: UserId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author: Some(author),
            created_at: now_epoch_ms(),
        }
    }

    /// Returns whether `user` owns this note.
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author == Some(user)
    }

    /// Validates the record shape required for persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)?;
        if self.slug.is_empty() {
            return Err(NoteValidationError::new(
                NoteField::Slug,
                REQUIRED_FIELD_MESSAGE,
            ));
        }
        validate_format(&self.slug)?;
        Ok(())
    }
}

/// Form fields submitted on create/edit.
///
/// An empty `slug` asks the service to derive one from `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
        }
    }

    /// Returns a copy with surrounding whitespace stripped from every field.
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            text: self.text.trim().to_string(),
            slug: self.slug.trim().to_string(),
        }
    }

    /// Validates form input. A blank slug is accepted here.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)?;
        let slug = self.slug.trim();
        if !slug.is_empty() {
            validate_format(slug)?;
        }
        Ok(())
    }
}

/// Form field addressed by a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteField {
    Title,
    Text,
    Slug,
}

impl NoteField {
    /// Returns the form field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::Slug => "slug",
        }
    }
}

/// Field-level validation failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteValidationError {
    pub field: NoteField,
    pub message: String,
}

impl NoteValidationError {
    pub fn new(field: NoteField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

impl Error for NoteValidationError {}

impl From<SlugError> for NoteValidationError {
    fn from(value: SlugError) -> Self {
        Self::new(NoteField::Slug, value.to_string())
    }
}

fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::new(
            NoteField::Title,
            REQUIRED_FIELD_MESSAGE,
        ));
    }
    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(NoteValidationError::new(
            NoteField::Title,
            format!(
                "Убедитесь, что это значение содержит не более {TITLE_MAX_CHARS} символов (сейчас {length})."
            ),
        ));
    }
    Ok(())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

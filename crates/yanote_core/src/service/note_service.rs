//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/list/retrieve/update/delete for one requester at a time.
//! - Resolve and validate slugs, and apply the ownership policy before any
//!   read or write.
//!
//! # Invariants
//! - The requester is always passed in explicitly; the service keeps no
//!   session state.
//! - Missing notes and notes owned by someone else yield the same
//!   `NoteServiceError::NotFound`.
//! - A failed create/update persists nothing.

use crate::model::note::{Note, NoteField, NoteId, NoteInput, NoteValidationError};
use crate::model::user::User;
use crate::policy::access::{authorize, can_list, filter_visible, NoteAction};
use crate::policy::slug::{resolve_slug, validate_unique, SlugError};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Form input rejected; reported next to the offending field.
    Validation(NoteValidationError),
    /// Slug already used by another note.
    DuplicateSlug(String),
    /// No note with this slug is visible to the requester.
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl NoteServiceError {
    /// Returns `(field, message)` for errors shown next to a form field.
    pub fn field_error(&self) -> Option<(NoteField, String)> {
        match self {
            Self::Validation(err) => Some((err.field, err.message.clone())),
            Self::DuplicateSlug(_) => Some((NoteField::Slug, self.to_string())),
            _ => None,
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{}", err.message),
            Self::DuplicateSlug(slug) => {
                write!(f, "{}", SlugError::Duplicate(slug.clone()))
            }
            Self::NotFound(slug) => write!(f, "note not found: `{slug}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SlugError> for NoteServiceError {
    fn from(value: SlugError) -> Self {
        match value {
            SlugError::Duplicate(slug) => Self::DuplicateSlug(slug),
            invalid @ SlugError::Invalid(_) => Self::Validation(invalid.into()),
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a note owned by `requester`.
    ///
    /// An empty `input.slug` is replaced by one derived from the title.
    pub fn create(&self, requester: &User, input: NoteInput) -> Result<Note, NoteServiceError> {
        let input = input.normalized();
        input.validate()?;

        let slug = resolve_slug(&input.title, &input.slug);
        validate_unique(&slug, &self.repo.conflicting_slugs(&slug, None)?)?;

        let note = Note::new(requester.id, input.title, input.text, slug);
        self.repo.insert_note(&note)?;
        self.repo
            .find_by_slug(&note.slug)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Lists the requester's notes in creation order.
    pub fn list(&self, requester: &User) -> Result<Vec<Note>, NoteServiceError> {
        if !can_list(requester) {
            return Ok(Vec::new());
        }
        let notes = self.repo.find_all_by_author(requester.id)?;
        Ok(filter_visible(requester, notes))
    }

    /// Loads one note the requester may view.
    pub fn retrieve(&self, requester: &User, slug: &str) -> Result<Note, NoteServiceError> {
        self.load_for(requester, slug, NoteAction::View)
    }

    /// Loads one note if `requester` may perform `action` on it.
    pub fn load_for(
        &self,
        requester: &User,
        slug: &str,
        action: NoteAction,
    ) -> Result<Note, NoteServiceError> {
        match self.repo.find_by_slug(slug)? {
            Some(note) if authorize(requester, &note, action) => Ok(note),
            _ => Err(NoteServiceError::NotFound(slug.to_string())),
        }
    }

    /// Replaces title, text and slug of a note owned by `requester`.
    ///
    /// The note's own current slug does not count as a collision.
    pub fn update(
        &self,
        requester: &User,
        slug: &str,
        input: NoteInput,
    ) -> Result<Note, NoteServiceError> {
        let mut note = self.load_for(requester, slug, NoteAction::Edit)?;

        let input = input.normalized();
        input.validate()?;

        let new_slug = resolve_slug(&input.title, &input.slug);
        validate_unique(
            &new_slug,
            &self.repo.conflicting_slugs(&new_slug, Some(note.id))?,
        )?;

        note.title = input.title;
        note.text = input.text;
        note.slug = new_slug;
        match self.repo.update_note(&note) {
            Ok(()) => {}
            Err(RepoError::NotFound(_)) => {
                return Err(NoteServiceError::NotFound(slug.to_string()))
            }
            Err(err) => return Err(err.into()),
        }
        self.repo
            .find_by_slug(&note.slug)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Deletes a note owned by `requester` and returns its id.
    pub fn delete(&self, requester: &User, slug: &str) -> Result<NoteId, NoteServiceError> {
        let note = self.load_for(requester, slug, NoteAction::Delete)?;
        match self.repo.delete_note(note.id) {
            Ok(()) => Ok(note.id),
            // Removed concurrently between load and delete.
            Err(RepoError::NotFound(_)) => Err(NoteServiceError::NotFound(slug.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// Counts all stored notes.
    pub fn count(&self) -> Result<u64, NoteServiceError> {
        Ok(self.repo.count_notes()?)
    }
}

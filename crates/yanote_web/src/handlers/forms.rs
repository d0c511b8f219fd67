//! Form documents returned by the add/edit pages.

use serde::Serialize;
use std::collections::BTreeMap;
use yanote_core::{Note, NoteField, NoteInput};

/// Note form as shown to the client: current field values plus errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormDocument {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

impl FormDocument {
    pub fn from_input(input: NoteInput) -> Self {
        Self {
            title: input.title,
            text: input.text,
            slug: input.slug,
            errors: BTreeMap::new(),
        }
    }

    /// Prefills the form with a stored note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_error(mut self, field: NoteField, message: String) -> Self {
        self.errors.entry(field.as_str()).or_default().push(message);
        self
    }
}

//! Ownership-based access policy for notes.
//!
//! # Responsibility
//! - Decide whether a requester may view, edit or delete a given note.
//! - Restrict list results to the requester's own notes.
//!
//! # Invariants
//! - Only the author may act on a note; there is no shared or admin access.
//! - A note whose author was deleted is visible to nobody.
//! - Callers report every denial as "not found", never as "forbidden".

use crate::model::note::Note;
use crate::model::user::User;

/// Operation attempted on a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    View,
    Edit,
    Delete,
}

impl NoteAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Authenticated requesters may always list (their own) notes.
pub fn can_list(_requester: &User) -> bool {
    true
}

pub fn can_view(requester: &User, note: &Note) -> bool {
    note.is_authored_by(requester.id)
}

pub fn can_edit(requester: &User, note: &Note) -> bool {
    note.is_authored_by(requester.id)
}

pub fn can_delete(requester: &User, note: &Note) -> bool {
    note.is_authored_by(requester.id)
}

/// Dispatches to the per-action rule.
pub fn authorize(requester: &User, note: &Note, action: NoteAction) -> bool {
    match action {
        NoteAction::View => can_view(requester, note),
        NoteAction::Edit => can_edit(requester, note),
        NoteAction::Delete => can_delete(requester, note),
    }
}

/// Keeps the notes authored by `requester`, preserving input order.
pub fn filter_visible(requester: &User, notes: Vec<Note>) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| note.is_authored_by(requester.id))
        .collect()
}

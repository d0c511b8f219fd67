//! Note handlers.
//!
//! # Responsibility
//! - Map the list/add/detail/edit/delete routes onto `NoteService`.
//! - Redirect to the success page after every successful write.
//!
//! # Invariants
//! - Every handler runs for an authenticated requester only.
//! - Note titles and bodies never reach the log; only ids and outcomes do.

use super::forms::FormDocument;
use super::{note_service, DONE_PATH};
use crate::error::WebError;
use crate::requester::CurrentUser;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use log::info;
use serde_json::{json, Value};
use yanote_core::{Note, NoteAction, NoteId, NoteInput, User};

/// Lists the requester's notes.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, WebError> {
    let notes = state
        .with_connection(move |conn| Ok(note_service(conn)?.list(&user)?))
        .await?;
    Ok(Json(json!({ "object_list": notes })))
}

/// Empty creation form.
pub async fn add_form(CurrentUser(_user): CurrentUser) -> Json<Value> {
    Json(json!({ "form": FormDocument::default() }))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(input): Form<NoteInput>,
) -> Result<Redirect, WebError> {
    let result = state
        .with_connection(move |conn| {
            let service = note_service(conn)?;
            service
                .create(&user, input.clone())
                .map(|note| note.id)
                .map_err(|err| WebError::from_submission(err, input))
        })
        .await;
    log_write("note_create", &result);
    result.map(|_| Redirect::to(DONE_PATH))
}

pub async fn detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, WebError> {
    let note = load_note(&state, user, slug, NoteAction::View).await?;
    Ok(Json(json!({ "note": note })))
}

/// Edit form prefilled with the stored note.
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, WebError> {
    let note = load_note(&state, user, slug, NoteAction::Edit).await?;
    Ok(Json(json!({
        "form": FormDocument::from_note(&note),
        "note": note,
    })))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
    Form(input): Form<NoteInput>,
) -> Result<Redirect, WebError> {
    let result = state
        .with_connection(move |conn| {
            let service = note_service(conn)?;
            service
                .update(&user, &slug, input.clone())
                .map(|note| note.id)
                .map_err(|err| WebError::from_submission(err, input))
        })
        .await;
    log_write("note_update", &result);
    result.map(|_| Redirect::to(DONE_PATH))
}

/// Delete confirmation page.
pub async fn delete_confirm(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, WebError> {
    let note = load_note(&state, user, slug, NoteAction::Delete).await?;
    Ok(Json(json!({ "note": note })))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Redirect, WebError> {
    let result = state
        .with_connection(move |conn| {
            Ok(note_service(conn)?.delete(&user, &slug)?)
        })
        .await;
    log_write("note_delete", &result);
    result.map(|_| Redirect::to(DONE_PATH))
}

async fn load_note(
    state: &AppState,
    user: User,
    slug: String,
    action: NoteAction,
) -> Result<Note, WebError> {
    state
        .with_connection(move |conn| Ok(note_service(conn)?.load_for(&user, &slug, action)?))
        .await
}

fn log_write(event: &str, result: &Result<NoteId, WebError>) {
    match result {
        Ok(note_id) => info!("event={event} module=web status=ok note_id={note_id}"),
        Err(WebError::Form(_)) => info!("event={event} module=web status=rejected"),
        Err(WebError::NotFound) => info!("event={event} module=web status=not_found"),
        // Logged with its detail when the response is built.
        Err(WebError::Internal(_)) => {}
    }
}

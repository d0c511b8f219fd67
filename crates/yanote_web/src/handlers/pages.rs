//! Static pages: home and the post-write success page.

use crate::requester::CurrentUser;
use axum::Json;
use serde_json::{json, Value};

/// Public landing page.
pub async fn home() -> Json<Value> {
    Json(json!({
        "app": "YaNote",
        "version": yanote_core::core_version(),
    }))
}

/// Shown after a note was added, edited or deleted.
pub async fn done(CurrentUser(_user): CurrentUser) -> Json<Value> {
    Json(json!({ "detail": "Успешно!" }))
}

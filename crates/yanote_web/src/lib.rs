//! HTTP layer for YaNote.
//!
//! # Responsibility
//! - Route requests to `yanote_core` services for the resolved requester.
//! - Own the shared SQLite connection and run storage work off the async
//!   runtime threads.
//!
//! # Invariants
//! - Core operations run inside `spawn_blocking`, one at a time, behind the
//!   connection mutex.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod requester;

use crate::config::WebConfig;
use crate::error::WebError;
use axum::routing::get;
use axum::Router;
use handlers::{notes, pages};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WebConfig>,
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection, as returned by `yanote_core::db::open_db`.
    pub fn new(config: WebConfig, conn: Connection) -> Self {
        Self {
            config: Arc::new(config),
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` with exclusive access to the connection on the blocking pool.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&Connection) -> Result<T, WebError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| WebError::Internal("database mutex poisoned".to_string()))?;
            f(&*conn)
        })
        .await
        .map_err(|err| WebError::Internal(format!("storage task failed: {err}")))?
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/done/", get(pages::done))
        .route("/notes/", get(notes::list))
        .route("/add/", get(notes::add_form).post(notes::create))
        .route("/note/{slug}/", get(notes::detail))
        .route("/edit/{slug}/", get(notes::edit_form).post(notes::update))
        .route(
            "/delete/{slug}/",
            get(notes::delete_confirm).post(notes::delete),
        )
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

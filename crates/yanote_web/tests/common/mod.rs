#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use yanote_core::db::open_db_in_memory;
use yanote_core::{
    Note, NoteInput, NoteRepository, NoteService, SqliteNoteRepository, SqliteUserRepository,
    UserService,
};
use yanote_web::config::WebConfig;
use yanote_web::{create_router, AppState};

pub const AUTHOR: &str = "Лев Толстой";
pub const READER: &str = "Мимо Крокодил";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App with default config and two accounts, `AUTHOR` and `READER`.
    pub fn new() -> Self {
        Self::with_config(WebConfig::default())
    }

    pub fn with_config(config: WebConfig) -> Self {
        let conn = open_db_in_memory().unwrap();
        {
            let users = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
            users.create_user(AUTHOR).unwrap();
            users.create_user(READER).unwrap();
        }
        let state = AppState::new(config, conn);
        let router = create_router(state.clone());
        Self { state, router }
    }

    /// Stores a note for `username` directly through the core service.
    pub async fn seed_note(&self, username: &str, title: &str, text: &str, slug: &str) -> Note {
        let username = username.to_string();
        let input = NoteInput::new(title, text, slug);
        self.state
            .with_connection(move |conn| {
                let users = UserService::new(SqliteUserRepository::try_new(conn).unwrap());
                let user = users.find_by_username(&username).unwrap().unwrap();
                let notes = NoteService::new(SqliteNoteRepository::try_new(conn).unwrap());
                Ok(notes.create(&user, input).unwrap())
            })
            .await
            .unwrap()
    }

    pub async fn find_note(&self, slug: &str) -> Option<Note> {
        let slug = slug.to_string();
        self.state
            .with_connection(move |conn| {
                Ok(SqliteNoteRepository::try_new(conn)
                    .unwrap()
                    .find_by_slug(&slug)
                    .unwrap())
            })
            .await
            .unwrap()
    }

    pub async fn count_notes(&self) -> u64 {
        self.state
            .with_connection(|conn| {
                Ok(SqliteNoteRepository::try_new(conn)
                    .unwrap()
                    .count_notes()
                    .unwrap())
            })
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> Response<Body> {
        let request = with_user(Request::get(uri), user)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(
        &self,
        uri: &str,
        user: Option<&str>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = with_user(Request::post(uri), user)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn with_user(
    builder: axum::http::request::Builder,
    user: Option<&str>,
) -> axum::http::request::Builder {
    match user {
        Some(username) => builder.header(
            "x-remote-user",
            HeaderValue::from_bytes(username.as_bytes()).unwrap(),
        ),
        None => builder,
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts a 303 redirect and returns its target.
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// Login redirect target for an anonymous request to a plain ASCII `path`.
pub fn login_redirect(path: &str) -> String {
    format!("/auth/login/?next={path}")
}

//! Requester resolution.
//!
//! # Responsibility
//! - Resolve the authenticated user from the trusted header set by the
//!   upstream authentication provider.
//! - Send anonymous requesters to the login page with a `next` target.
//!
//! # Invariants
//! - A missing header, a blank or non-UTF-8 value, and an unknown username
//!   are all anonymous.

use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use url::form_urlencoded::byte_serialize;
use yanote_core::{SqliteUserRepository, User, UserService};

/// Authenticated requester; rejects anonymous requests with a login redirect.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(username) = header_username(parts, &state.config.auth.user_header) else {
            return Err(login_redirect(&state.config.auth.login_url, parts));
        };

        let user = state
            .with_connection(move |conn| {
                let users = UserService::new(SqliteUserRepository::try_new(conn)?);
                Ok(users.find_by_username(&username)?)
            })
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(Self(user)),
            None => Err(login_redirect(&state.config.auth.login_url, parts)),
        }
    }
}

fn header_username(parts: &Parts, header: &str) -> Option<String> {
    let value = parts.headers.get(header)?;
    // Header bytes are taken as UTF-8 so non-ASCII usernames survive.
    let username = std::str::from_utf8(value.as_bytes()).ok()?.trim();
    (!username.is_empty()).then(|| username.to_string())
}

fn login_redirect(login_url: &str, parts: &Parts) -> Response {
    let next = parts
        .uri
        .path_and_query()
        .map(|value| value.as_str())
        .unwrap_or_else(|| parts.uri.path());
    Redirect::to(&login_target(login_url, next)).into_response()
}

/// Builds `{login_url}?next={next}`.
///
/// `next` is percent-encoded except for `/`, so paths stay readable:
/// `/notes/` yields `?next=/notes/`. An existing query on `login_url` is
/// extended with `&next=`.
pub fn login_target(login_url: &str, next: &str) -> String {
    let encoded: String = byte_serialize(next.as_bytes()).collect();
    let encoded = encoded.replace('+', "%20").replace("%2F", "/");
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!("{login_url}{separator}next={encoded}")
}

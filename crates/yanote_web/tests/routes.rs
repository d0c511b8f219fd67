mod common;

use axum::http::StatusCode;
use common::{json_body, login_redirect, redirect_target, TestApp, AUTHOR, READER};
use yanote_web::config::WebConfig;

#[tokio::test]
async fn home_page_is_public() {
    let app = TestApp::new();

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["app"], "YaNote");
    assert_eq!(body["version"], yanote_core::core_version());
}

#[tokio::test]
async fn notes_pages_accessible_to_authenticated_user() {
    let app = TestApp::new();

    for uri in ["/notes/", "/done/", "/add/"] {
        let response = app.get(uri, Some(READER)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn detail_edit_delete_available_only_to_author() {
    let app = TestApp::new();
    let note = app.seed_note(AUTHOR, "Заголовок", "Текст", "").await;

    for (user, status) in [(AUTHOR, StatusCode::OK), (READER, StatusCode::NOT_FOUND)] {
        for prefix in ["note", "edit", "delete"] {
            let uri = format!("/{prefix}/{}/", note.slug);
            let response = app.get(&uri, Some(user)).await;
            assert_eq!(response.status(), status, "{user} {uri}");
        }
    }
}

#[tokio::test]
async fn anonymous_client_is_redirected_to_login() {
    let app = TestApp::new();
    let note = app.seed_note(AUTHOR, "Заголовок", "Текст", "").await;

    let mut uris: Vec<String> = ["/notes/", "/done/", "/add/"]
        .into_iter()
        .map(str::to_string)
        .collect();
    for prefix in ["note", "edit", "delete"] {
        uris.push(format!("/{prefix}/{}/", note.slug));
    }

    for uri in uris {
        let response = app.get(&uri, None).await;
        assert_eq!(redirect_target(&response), login_redirect(&uri), "{uri}");
    }
}

#[tokio::test]
async fn login_next_keeps_slashes_readable() {
    let app = TestApp::new();

    let response = app.get("/notes/", None).await;
    assert_eq!(redirect_target(&response), "/auth/login/?next=/notes/");
}

#[tokio::test]
async fn unknown_user_is_treated_as_anonymous() {
    let app = TestApp::new();

    let response = app.get("/notes/", Some("Незнакомец")).await;
    assert_eq!(redirect_target(&response), login_redirect("/notes/"));

    let response = app.get("/notes/", Some("   ")).await;
    assert_eq!(redirect_target(&response), login_redirect("/notes/"));
}

#[tokio::test]
async fn login_url_is_configurable() {
    let mut config = WebConfig::default();
    config.auth.login_url = "/accounts/login/".to_string();
    let app = TestApp::with_config(config);

    let response = app.get("/add/", None).await;
    assert_eq!(
        redirect_target(&response),
        "/accounts/login/?next=/add/"
    );
}

#[tokio::test]
async fn missing_and_foreign_notes_look_the_same() {
    let app = TestApp::new();
    let note = app.seed_note(AUTHOR, "Заголовок", "Текст", "slug").await;

    let foreign = app.get(&format!("/note/{}/", note.slug), Some(READER)).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let missing = app.get("/note/no-such-slug/", Some(READER)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    assert_eq!(json_body(foreign).await, json_body(missing).await);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/nowhere/", Some(AUTHOR)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

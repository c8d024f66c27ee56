use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use reportgen::fonts;
use reportgen::routes;
use reportgen::state::AppState;
use reportgen::store::ArtifactStore;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = ArtifactStore::open(dir.path().join("reports")).expect("open store");
    (dir, routes::router(AppState::new(store)))
}

fn skip_notice(test: &str) {
    eprintln!(
        "Skipping {test}: bundled fonts missing. Set REPORTGEN_FONTS_DIR or copy assets/fonts next to the binary."
    );
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("route request")
}

async fn post_form(app: Router, uri: &str, body: &'static str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Body::from(body))
            .expect("build request"),
    )
    .await
    .expect("route request")
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collect body")
        .to_vec()
}

#[tokio::test]
async fn form_page_is_served() {
    let (_dir, app) = test_app();
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).expect("utf-8 body");
    assert!(body.contains("<form"));
    assert!(body.contains("name=\"heading\""));
    assert!(body.contains("name=\"content\""));
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (_dir, app) = test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_form_field_is_rejected() {
    let (_dir, app) = test_app();
    let response = post_form(app, "/generate", "heading=Only+a+heading").await;

    assert!(
        response.status().is_client_error(),
        "missing content field must be rejected before the handler runs, got {}",
        response.status()
    );
}

#[tokio::test]
async fn unknown_download_is_ok_with_json_error() {
    let (_dir, app) = test_app();
    let response = get(app, "/download/never-generated.pdf").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn malformed_markup_surfaces_as_server_error() {
    let (_dir, app) = test_app();
    let response = post_form(app, "/generate", "heading=**oops&content=fine").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn generate_then_download_round_trip() {
    if !fonts::default_fonts_available() {
        skip_notice("generate_then_download_round_trip");
        return;
    }

    let (_dir, app) = test_app();
    let response = post_form(
        app.clone(),
        "/generate",
        "heading=Quarterly+Report&content=First+line.%0A%0ASecond+line.",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_string();
    assert!(location.starts_with("/download/"));
    assert!(location.ends_with(".pdf"));

    let download = get(app, &location).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/pdf")
    );
    let disposition = download
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .expect("content disposition")
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(location.trim_start_matches("/download/")));

    let body = body_bytes(download).await;
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn identical_submissions_produce_distinct_files() {
    if !fonts::default_fonts_available() {
        skip_notice("identical_submissions_produce_distinct_files");
        return;
    }

    let (_dir, app) = test_app();
    let form = "heading=Same&content=Same+body";

    let (first, second) = tokio::join!(
        post_form(app.clone(), "/generate", form),
        post_form(app.clone(), "/generate", form)
    );
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    let first_location = first.headers()[header::LOCATION]
        .to_str()
        .expect("location")
        .to_string();
    let second_location = second.headers()[header::LOCATION]
        .to_str()
        .expect("location")
        .to_string();
    assert_ne!(first_location, second_location);

    for location in [first_location, second_location] {
        let download = get(app.clone(), &location).await;
        assert_eq!(download.status(), StatusCode::OK);
        assert!(body_bytes(download).await.starts_with(b"%PDF"));
    }
}

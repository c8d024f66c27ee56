//! HTTP front door: form page, report generation, artifact download.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, ErrorBody, StoreError};
use crate::render;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/generate", post(generate_report))
        .route("/download/{file_name}", get(download_report))
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Form payload for report generation.  Both fields are required; the `Form`
/// extractor rejects requests missing either before the handler runs.
#[derive(Deserialize)]
pub struct ReportForm {
    pub heading: String,
    pub content: String,
}

async fn generate_report(
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Result<Redirect, ApiError> {
    let report = render::render_report(&form.heading, &form.content, &state.styles)?;
    let name = state.store.save(&report.bytes)?;
    tracing::info!(file = %name, bytes = report.bytes.len(), "generated report");
    Ok(Redirect::to(&format!("/download/{name}")))
}

async fn download_report(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Response {
    match state.store.retrieve(&file_name) {
        Ok(artifact) => (
            [
                (header::CONTENT_TYPE, artifact.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                ),
            ],
            artifact.body,
        )
            .into_response(),
        // A missing file is reported as a 200 with a JSON error payload;
        // clients inspect the body rather than the status code.
        Err(StoreError::NotFound { .. }) => Json(ErrorBody {
            error: "File not found".to_string(),
        })
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

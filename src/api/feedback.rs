//! Free-text feedback persistence.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::api::StatusResponse;
use crate::error::ApiResult;
use crate::{artifacts, AppState};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

/// POST /submit-feedback
///
/// Materializes the text twice (plain text and CSV with a timestamp
/// column), uploads both, then removes the local copies.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let timestamp = artifacts::timestamp();
    let (txt_path, csv_path) =
        artifacts::write_feedback(state.config.storage_dir(), &timestamp, &request.feedback)?;

    for path in [&txt_path, &csv_path] {
        // Artifact filenames double as store keys
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        state.store.put_file(path, key).await?;
        tokio::fs::remove_file(path).await?;
    }

    info!("Stored feedback artifacts for {}", timestamp);
    Ok(StatusResponse::success())
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/submit-feedback", post(submit_feedback))
}

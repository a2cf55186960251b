//! Media intake, listing, and the store diagnostic route.
//!
//! Intake is one linear pass per request: write the upload to the local
//! storage directory, optionally compress it, upload to the bucket, then
//! delete the local copies. Local files are deleted only after a successful
//! upload; a store failure returns 500 and leaves them in place.

use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::api::StatusResponse;
use crate::error::{ApiError, ApiResult};
use crate::{artifacts, transcoder, AppState};

const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// One uploaded multipart file field.
struct Upload {
    filename: String,
    data: axum::body::Bytes,
}

/// Pull the named file field (and an optional `question_index` text field)
/// out of a multipart body. Missing field or empty filename is a 400.
async fn read_upload(
    mut multipart: Multipart,
    field_name: &str,
) -> ApiResult<(Upload, Option<String>)> {
    let mut upload = None;
    let mut question_index = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        // Field accessors consume the field, so take the name up front
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(name) if name == field_name => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                upload = Some(Upload { filename, data });
            }
            Some("question_index") => {
                question_index = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let upload = upload
        .ok_or_else(|| ApiError::BadRequest(format!("No {} file in request", field_name)))?;
    if upload.filename.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Empty filename for {} upload",
            field_name
        )));
    }

    Ok((upload, question_index))
}

/// Write, optionally compress, upload, then clean up. Returns the store key.
async fn persist_recording(
    state: &AppState,
    upload: &Upload,
    question_index: Option<&str>,
    compress: bool,
) -> ApiResult<String> {
    let timestamp = artifacts::timestamp();
    let ext = artifacts::extension_of(&upload.filename, "webm");
    let raw_name = artifacts::recording_filename(&timestamp, question_index, ext);
    let raw_path = state.config.local_path(&raw_name);

    tokio::fs::write(&raw_path, &upload.data).await?;

    if compress {
        let compressed_name = artifacts::compressed_filename(&raw_name);
        let compressed_path = state.config.local_path(&compressed_name);
        transcoder::compress_to_mp4(&raw_path, &compressed_path).await?;
        state.store.put_file(&compressed_path, &compressed_name).await?;
        tokio::fs::remove_file(&raw_path).await?;
        tokio::fs::remove_file(&compressed_path).await?;
        Ok(compressed_name)
    } else {
        state.store.put_file(&raw_path, &raw_name).await?;
        tokio::fs::remove_file(&raw_path).await?;
        Ok(raw_name)
    }
}

/// POST /save-video
///
/// Multipart field `video`, plus optional form field `question_index`
/// carried into the stored filename.
pub async fn save_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<StatusResponse>> {
    let (upload, question_index) = read_upload(multipart, "video").await?;
    // The index goes straight into the filename and store key, so only
    // digits are accepted
    if let Some(index) = question_index.as_deref() {
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::BadRequest(format!(
                "question_index must be a non-negative integer, got {:?}",
                index
            )));
        }
    }
    let key = persist_recording(
        &state,
        &upload,
        question_index.as_deref(),
        state.config.compress_video,
    )
    .await?;
    info!("Saved video recording as {}", key);
    Ok(StatusResponse::success())
}

/// POST /save-audio
///
/// Multipart field `audio`. Audio is never transcoded.
pub async fn save_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<StatusResponse>> {
    let (upload, _) = read_upload(multipart, "audio").await?;
    let key = persist_recording(&state, &upload, None, false).await?;
    info!("Saved audio recording as {}", key);
    Ok(StatusResponse::success())
}

#[derive(Debug, Serialize)]
pub struct VideoEntry {
    pub filename: String,
    pub url: String,
}

/// GET /list-videos
///
/// Every key in the bucket with a one-hour signed playback URL.
pub async fn list_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<VideoEntry>>> {
    let keys = state.store.list_keys().await?;
    if keys.is_empty() {
        return Err(ApiError::NotFound(
            "No videos found in the bucket.".to_string(),
        ));
    }

    let mut videos = Vec::with_capacity(keys.len());
    for key in keys {
        let url = state.store.presign_get(&key, SIGNED_URL_TTL).await?;
        videos.push(VideoEntry { filename: key, url });
    }
    Ok(Json(videos))
}

#[derive(Debug, Serialize)]
pub struct StoreDiagnostics {
    pub bucket: String,
    pub keys: Vec<String>,
}

/// GET /test-s3
///
/// Diagnostic: proves the store is reachable and shows what is in it.
pub async fn test_store(State(state): State<AppState>) -> ApiResult<Json<StoreDiagnostics>> {
    let keys = state.store.list_keys().await?;
    Ok(Json(StoreDiagnostics {
        bucket: state.config.bucket.clone(),
        keys,
    }))
}

pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/save-video", post(save_video))
        .route("/save-audio", post(save_audio))
        .route("/list-videos", get(list_videos))
        .route("/test-s3", get(test_store))
}

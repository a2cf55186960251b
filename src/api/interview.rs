//! Session initiation: question sampling and the pre-interview device check.

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::info;

use crate::questions::sample_questions;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// POST /conduct-interview
///
/// Draws a fresh random sample per call; nothing about the session is
/// tracked server-side.
pub async fn conduct_interview(State(state): State<AppState>) -> Json<QuestionsResponse> {
    let questions = sample_questions(state.config.question_count);
    info!("Issued {} interview questions", questions.len());
    Json(QuestionsResponse { questions })
}

#[derive(Debug, Serialize)]
pub struct DeviceCheckResponse {
    pub status: &'static str,
    pub mic: bool,
    pub camera: bool,
}

// Device probes are stubs until real probing is implemented; the browser
// does the actual getUserMedia permission dance.
fn probe_microphone() -> bool {
    true
}

fn probe_camera() -> bool {
    true
}

/// POST /check-devices
pub async fn check_devices() -> Json<DeviceCheckResponse> {
    Json(DeviceCheckResponse {
        status: "ok",
        mic: probe_microphone(),
        camera: probe_camera(),
    })
}

pub fn interview_routes() -> Router<AppState> {
    Router::new()
        .route("/conduct-interview", post(conduct_interview))
        .route("/check-devices", post(check_devices))
}

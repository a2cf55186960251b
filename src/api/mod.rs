//! HTTP API handlers.

pub mod feedback;
pub mod health;
pub mod interview;
pub mod media;
pub mod ui;

pub use feedback::feedback_routes;
pub use health::health_routes;
pub use interview::interview_routes;
pub use media::media_routes;
pub use ui::ui_routes;

use axum::Json;
use serde::Serialize;

/// Body returned by every successful save endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Json<Self> {
        Json(Self { status: "success" })
    }
}

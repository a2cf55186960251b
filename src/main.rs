//! virtual-interview - scripted interview web backend
//!
//! Serves the interview entry page, issues random question samples, accepts
//! browser media uploads, optionally compresses video through ffmpeg, and
//! persists recordings and feedback to an object store bucket.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use virtual_interview::config::{Config, StoreBackend};
use virtual_interview::store::{MemoryStore, ObjectStore, S3Store};
use virtual_interview::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting virtual-interview v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load()?;
    config.ensure_storage_dir()?;
    info!("Local storage: {}", config.storage_dir.display());

    let store: Arc<dyn ObjectStore> = match config.store_backend {
        StoreBackend::S3 => {
            info!("Object store: s3://{}", config.bucket);
            Arc::new(S3Store::connect(&config.bucket).await)
        }
        StoreBackend::Memory => {
            warn!("Object store: in-memory, objects will not outlive the process");
            MemoryStore::new()
        }
    };

    if config.compress_video {
        info!("Video compression enabled (ffmpeg, H.264/AAC)");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, store);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

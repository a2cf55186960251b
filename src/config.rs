//! Configuration resolution.
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variable overrides (highest priority). No command line surface.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Which object store backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// AWS S3, credentials resolved from the ambient environment
    S3,
    /// Process-local map, for development and tests without cloud credentials
    Memory,
}

/// Process-wide configuration, passed to handlers via `AppState`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Destination bucket for recordings and feedback artifacts
    pub bucket: String,
    /// Local ephemeral storage directory, created on startup if absent
    pub storage_dir: PathBuf,
    /// Number of questions drawn per interview session
    pub question_count: usize,
    /// Re-encode uploaded video to H.264/AAC before upload
    pub compress_video: bool,
    /// Object store backend selection
    pub store_backend: StoreBackend,
    /// API key for the speech recognition service, if transcription is wanted
    pub speech_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5730".to_string(),
            bucket: "virtualinterviewstorage".to_string(),
            storage_dir: PathBuf::from("local_storage"),
            question_count: 2,
            compress_video: true,
            store_backend: StoreBackend::S3,
            speech_api_key: None,
        }
    }
}

impl Config {
    /// Resolve configuration: defaults, then TOML file, then environment.
    ///
    /// The TOML path comes from `INTERVIEW_CONFIG`, falling back to
    /// `interview.toml` in the working directory. A missing file is not an
    /// error; a malformed one is.
    pub fn load() -> Result<Self> {
        let toml_path = std::env::var("INTERVIEW_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("interview.toml"));

        let mut config = if toml_path.exists() {
            let content = std::fs::read_to_string(&toml_path)
                .with_context(|| format!("reading {}", toml_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", toml_path.display()))?;
            info!("Loaded configuration from {}", toml_path.display());
            config
        } else {
            info!("No config file at {}, using defaults", toml_path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("INTERVIEW_BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Ok(v) = std::env::var("INTERVIEW_BUCKET") {
            self.bucket = v;
        }
        if let Ok(v) = std::env::var("INTERVIEW_STORAGE_DIR") {
            self.storage_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("INTERVIEW_QUESTION_COUNT") {
            self.question_count = v
                .parse()
                .context("INTERVIEW_QUESTION_COUNT must be a non-negative integer")?;
        }
        if let Ok(v) = std::env::var("INTERVIEW_COMPRESS_VIDEO") {
            self.compress_video = v
                .parse()
                .context("INTERVIEW_COMPRESS_VIDEO must be true or false")?;
        }
        if let Ok(v) = std::env::var("INTERVIEW_STORE_BACKEND") {
            self.store_backend = match v.as_str() {
                "s3" => StoreBackend::S3,
                "memory" => StoreBackend::Memory,
                other => anyhow::bail!("unknown INTERVIEW_STORE_BACKEND: {}", other),
            };
        }
        if let Ok(v) = std::env::var("INTERVIEW_SPEECH_API_KEY") {
            self.speech_api_key = Some(v);
        }
        Ok(())
    }

    /// Create the local storage directory if it does not exist yet.
    pub fn ensure_storage_dir(&self) -> std::io::Result<()> {
        if !self.storage_dir.exists() {
            warn!(
                "Storage directory {} missing, creating it",
                self.storage_dir.display()
            );
        }
        std::fs::create_dir_all(&self.storage_dir)
    }

    /// Path of a local artifact inside the storage directory.
    pub fn local_path(&self, filename: &str) -> PathBuf {
        self.storage_dir.join(filename)
    }

    /// Storage directory as a `Path`.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_deployment() {
        let config = Config::default();
        assert_eq!(config.bucket, "virtualinterviewstorage");
        assert_eq!(config.question_count, 2);
        assert!(config.compress_video);
        assert_eq!(config.store_backend, StoreBackend::S3);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            question_count = 6
            compress_video = false
            store_backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.question_count, 6);
        assert!(!config.compress_video);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        // Untouched fields keep their defaults
        assert_eq!(config.bucket, "virtualinterviewstorage");
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        let result = toml::from_str::<Config>("quesion_count = 2\n");
        assert!(result.is_err());
    }
}

//! Video compression via an external ffmpeg process.
//!
//! Re-encodes a raw browser recording (typically WebM) to H.264 video with
//! AAC audio in an MP4 container. ffmpeg performs all format validation.

use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::info;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("failed to start ffmpeg: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

fn encode_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Re-encode `input` into `output` as H.264/AAC MP4.
///
/// Blocks the request until ffmpeg exits; there is no timeout beyond the
/// process running to completion.
pub async fn compress_to_mp4(input: &Path, output: &Path) -> Result<(), TranscodeError> {
    info!(
        "Compressing {} -> {}",
        input.display(),
        output.display()
    );

    let result = Command::new("ffmpeg")
        .args(encode_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !result.status.success() {
        return Err(TranscodeError::Failed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn encode_args_target_h264_and_aac() {
        let args = encode_args(
            &PathBuf::from("in/raw.webm"),
            &PathBuf::from("out/compressed.mp4"),
        );
        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "in/raw.webm",
                "-c:v",
                "libx264",
                "-c:a",
                "aac",
                "out/compressed.mp4",
            ]
        );
    }
}

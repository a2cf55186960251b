//! Speech-to-text client.
//!
//! Posts a whole audio file (16-bit linear PCM at 16 kHz, English) to the
//! recognizer in one request and concatenates the returned transcript
//! segments. No route currently invokes this; it is library surface for the
//! planned transcript feature. No chunking for long audio, no streaming.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

const RECOGNIZE_URL: &str = "https://speech.googleapis.com/v1/speech:recognize";

pub struct Transcriber {
    http: reqwest::Client,
    api_key: String,
}

impl Transcriber {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Transcribe the audio file at `path`.
    pub async fn transcribe(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        let payload = json!({
            "config": {
                "encoding": "LINEAR16",
                "sampleRateHertz": 16000,
                "languageCode": "en-US",
            },
            "audio": {
                "content": BASE64.encode(&bytes),
            },
        });

        let response = self
            .http
            .post(RECOGNIZE_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .context("speech recognition request failed")?
            .error_for_status()
            .context("speech recognition service rejected the request")?;

        let body: Value = response.json().await.context("parsing recognizer response")?;
        Ok(collect_transcript(&body))
    }
}

/// Concatenate the top transcript of each result, newline-separated.
/// Each segment keeps its trailing newline, matching the original output.
pub fn collect_transcript(response: &Value) -> String {
    let mut transcript = String::new();
    if let Some(results) = response.get("results").and_then(Value::as_array) {
        for result in results {
            if let Some(text) = result
                .get("alternatives")
                .and_then(Value::as_array)
                .and_then(|alts| alts.first())
                .and_then(|alt| alt.get("transcript"))
                .and_then(Value::as_str)
            {
                transcript.push_str(text);
                transcript.push('\n');
            }
        }
    }
    transcript
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_top_alternative_per_result() {
        let response = json!({
            "results": [
                {"alternatives": [{"transcript": "hello world"}, {"transcript": "hallo"}]},
                {"alternatives": [{"transcript": "second segment"}]},
            ]
        });
        assert_eq!(
            collect_transcript(&response),
            "hello world\nsecond segment\n"
        );
    }

    #[test]
    fn empty_results_give_empty_transcript() {
        assert_eq!(collect_transcript(&json!({"results": []})), "");
        assert_eq!(collect_transcript(&json!({})), "");
    }

    #[test]
    fn result_without_alternatives_is_skipped() {
        let response = json!({
            "results": [
                {"alternatives": []},
                {"alternatives": [{"transcript": "kept"}]},
            ]
        });
        assert_eq!(collect_transcript(&response), "kept\n");
    }
}

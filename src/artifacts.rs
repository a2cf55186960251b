//! Local artifact naming and materialization.
//!
//! Every artifact is named from a second-resolution UTC timestamp, so the
//! filename doubles as the object store key. Two uploads landing in the same
//! second collide on the same name; that matches the original deployment and
//! is not defended against.

use std::path::{Path, PathBuf};

use chrono::Utc;

/// Timestamp component used in all artifact names, e.g. `20260830_142301`.
pub fn timestamp() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Filename for a raw recording:
/// `interview_<timestamp>[_question_<index>].<ext>`.
pub fn recording_filename(timestamp: &str, question_index: Option<&str>, ext: &str) -> String {
    match question_index {
        Some(index) => format!("interview_{}_question_{}.{}", timestamp, index, ext),
        None => format!("interview_{}.{}", timestamp, ext),
    }
}

/// Filename for the compressed rendition of a raw recording:
/// the raw stem plus `_compressed.mp4`.
pub fn compressed_filename(raw_filename: &str) -> String {
    let stem = Path::new(raw_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(raw_filename);
    format!("{}_compressed.mp4", stem)
}

/// Extension of an uploaded filename, or `fallback` when it has none.
pub fn extension_of<'a>(upload_name: &'a str, fallback: &'a str) -> &'a str {
    Path::new(upload_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or(fallback)
}

/// Write the two feedback artifacts into `dir`: a plain-text file holding
/// the feedback verbatim, and a CSV with a `Timestamp,Feedback` header and
/// one data row. Returns both paths; their file names are the store keys.
pub fn write_feedback(
    dir: &Path,
    timestamp: &str,
    feedback: &str,
) -> Result<(PathBuf, PathBuf), csv::Error> {
    let txt_path = dir.join(format!("feedback_{}.txt", timestamp));
    let csv_path = dir.join(format!("feedback_{}.csv", timestamp));

    std::fs::write(&txt_path, feedback)?;

    let mut writer = csv::Writer::from_path(&csv_path)?;
    writer.write_record(["Timestamp", "Feedback"])?;
    writer.write_record([timestamp, feedback])?;
    writer.flush()?;

    Ok((txt_path, csv_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_second_resolution_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
        assert!(ts.replace('_', "").chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn recording_filename_with_question_index() {
        assert_eq!(
            recording_filename("20260830_142301", Some("3"), "webm"),
            "interview_20260830_142301_question_3.webm"
        );
    }

    #[test]
    fn recording_filename_without_question_index() {
        assert_eq!(
            recording_filename("20260830_142301", None, "ogg"),
            "interview_20260830_142301.ogg"
        );
    }

    #[test]
    fn compressed_filename_replaces_extension() {
        assert_eq!(
            compressed_filename("interview_20260830_142301_question_3.webm"),
            "interview_20260830_142301_question_3_compressed.mp4"
        );
    }

    #[test]
    fn extension_falls_back_when_missing() {
        assert_eq!(extension_of("recording.webm", "webm"), "webm");
        assert_eq!(extension_of("clip.MP4", "webm"), "MP4");
        assert_eq!(extension_of("blob", "webm"), "webm");
        assert_eq!(extension_of("", "ogg"), "ogg");
    }

    #[test]
    fn feedback_artifacts_hold_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let (txt, csv) = write_feedback(dir.path(), "20260830_142301", "Great session").unwrap();

        assert_eq!(std::fs::read_to_string(&txt).unwrap(), "Great session");

        let csv_content = std::fs::read_to_string(&csv).unwrap();
        let mut lines = csv_content.lines();
        assert_eq!(lines.next(), Some("Timestamp,Feedback"));
        assert_eq!(lines.next(), Some("20260830_142301,Great session"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn feedback_with_commas_is_quoted_in_csv() {
        let dir = tempfile::tempdir().unwrap();
        let (_, csv) = write_feedback(dir.path(), "20260830_142301", "Good, but long").unwrap();
        let csv_content = std::fs::read_to_string(&csv).unwrap();
        assert!(csv_content.contains("\"Good, but long\""));
    }
}

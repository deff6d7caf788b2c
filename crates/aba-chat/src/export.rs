//! Transcript files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::ChatError;

/// `<app-name>-transcript-<unix-millis>.txt`
pub fn transcript_file_name(app_name: &str, at: DateTime<Utc>) -> String {
    format!("{}-transcript-{}.txt", app_name, at.timestamp_millis())
}

/// Write `transcript` into `dir`, creating the directory if needed.
pub fn write_transcript(dir: &Path, app_name: &str, transcript: &str) -> Result<PathBuf, ChatError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ChatError::Export(format!("cannot create {}: {}", dir.display(), e)))?;

    let path = dir.join(transcript_file_name(app_name, Utc::now()));
    std::fs::write(&path, transcript)
        .map_err(|e| ChatError::Export(format!("cannot write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), bytes = transcript.len(), "Transcript exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_name() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            transcript_file_name("aba-travel", at),
            "aba-travel-transcript-1700000000123.txt"
        );
    }

    #[test]
    fn test_write_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_transcript(dir.path(), "aba-travel", "[10:00:00] USER: hi").unwrap();

        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("aba-travel-transcript-"));
        assert!(name.ends_with(".txt"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[10:00:00] USER: hi"
        );
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("georgia");
        let path = write_transcript(&nested, "aba-travel", "x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_into_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let result = write_transcript(&blocker, "aba-travel", "x");
        assert!(matches!(result, Err(ChatError::Export(_))));
    }
}

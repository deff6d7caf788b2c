use thiserror::Error;

/// Top-level error type shared by the ABA Travel crates.
///
/// Library crates either return this directly (voice, location) or wrap it in
/// their own error type with a `From<AbaError>` conversion so the `?` operator
/// works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AbaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Location not available. Please enable GPS and try again.")]
    LocationUnavailable,

    #[error("Voice {capability} is not supported on this host")]
    VoiceUnsupported { capability: String },

    #[error("A voice session is already active")]
    VoiceBusy,

    #[error("Voice error: {0}")]
    Voice(String),
}

impl AbaError {
    /// Shorthand for a `VoiceUnsupported` error naming the missing capability.
    pub fn voice_unsupported(capability: &str) -> Self {
        AbaError::VoiceUnsupported {
            capability: capability.to_string(),
        }
    }
}

impl From<toml::de::Error> for AbaError {
    fn from(err: toml::de::Error) -> Self {
        AbaError::Config(err.to_string())
    }
}

/// A specialized `Result` type for ABA Travel operations.
pub type Result<T> = std::result::Result<T, AbaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AbaError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_location_unavailable_message() {
        let msg = AbaError::LocationUnavailable.to_string();
        assert!(msg.contains("Location not available"));
        assert!(msg.contains("GPS"));
    }

    #[test]
    fn test_voice_unsupported_names_capability() {
        let err = AbaError::voice_unsupported("recognition");
        assert!(matches!(err, AbaError::VoiceUnsupported { .. }));
        assert_eq!(
            err.to_string(),
            "Voice recognition is not supported on this host"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AbaError = io_err.into();
        assert!(matches!(err, AbaError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: AbaError = parsed.unwrap_err().into();
        assert!(matches!(err, AbaError::Config(_)));
    }

    #[test]
    fn test_unreadable_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = crate::config::AbaConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, AbaError::Io(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}

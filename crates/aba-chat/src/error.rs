use aba_core::AbaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),

    #[error("a response is still pending")]
    ResponsePending,

    #[error("pending response was cancelled")]
    ResponseCancelled,

    #[error("session is closed")]
    SessionClosed,

    #[error("Location not available. Please enable GPS and try again.")]
    LocationUnavailable,

    #[error("export error: {0}")]
    Export(String),

    #[error("core error: {0}")]
    Core(String),
}

impl From<AbaError> for ChatError {
    fn from(err: AbaError) -> Self {
        match err {
            AbaError::LocationUnavailable => ChatError::LocationUnavailable,
            other => ChatError::Core(other.to_string()),
        }
    }
}

//! Host speech capabilities and their availability wrapper.

use std::fmt;
use std::sync::Arc;

use aba_core::error::AbaError;
use aba_core::types::SpeechTag;
use async_trait::async_trait;

/// Speech-to-text provided by the host.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Listen for a single utterance and return its final transcript.
    async fn recognize(&self, tag: SpeechTag) -> Result<String, AbaError>;
}

/// Text-to-speech provided by the host.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Play `text` and resolve once playback has finished.
    async fn speak(&self, text: &str, tag: SpeechTag) -> Result<(), AbaError>;
}

/// A host capability that may or may not exist.
pub enum Capability<T: ?Sized> {
    Available(Arc<T>),
    Unsupported,
}

impl<T: ?Sized> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// The capability, or `None` when the host lacks it.
    pub fn get(&self) -> Option<&Arc<T>> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unsupported => None,
        }
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Available(inner) => Capability::Available(Arc::clone(inner)),
            Capability::Unsupported => Capability::Unsupported,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Available(_) => f.write_str("Available"),
            Capability::Unsupported => f.write_str("Unsupported"),
        }
    }
}

impl Capability<dyn SpeechRecognizer> {
    pub fn recognizer<R: SpeechRecognizer + 'static>(recognizer: R) -> Self {
        Capability::Available(Arc::new(recognizer))
    }
}

impl Capability<dyn SpeechSynthesizer> {
    pub fn synthesizer<S: SpeechSynthesizer + 'static>(synthesizer: S) -> Self {
        Capability::Available(Arc::new(synthesizer))
    }
}

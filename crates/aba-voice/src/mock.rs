//! Scripted speech backends for tests and headless hosts.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use aba_core::error::AbaError;
use aba_core::types::SpeechTag;
use async_trait::async_trait;

use crate::capability::{SpeechRecognizer, SpeechSynthesizer};

/// Recognizer that replays a queue of utterances, one per session.
#[derive(Debug, Default)]
pub struct MockRecognizer {
    utterances: Mutex<VecDeque<String>>,
    latency: Duration,
}

impl MockRecognizer {
    pub fn new(utterances: Vec<String>) -> Self {
        Self {
            utterances: Mutex::new(utterances.into()),
            latency: Duration::ZERO,
        }
    }

    /// Simulate the time a speaker takes before the transcript is final.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    fn name(&self) -> &str {
        "mock-recognizer"
    }

    async fn recognize(&self, tag: SpeechTag) -> Result<String, AbaError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self
            .utterances
            .lock()
            .map_err(|e| AbaError::Voice(format!("recognizer mutex poisoned: {}", e)))?
            .pop_front();
        match next {
            Some(text) => {
                tracing::debug!(tag = %tag, text_len = text.len(), "Mock utterance recognized");
                Ok(text)
            }
            None => Err(AbaError::Voice("no speech detected".to_string())),
        }
    }
}

/// Synthesizer that records what it was asked to say.
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    spoken: Mutex<Vec<(String, SpeechTag)>>,
    latency: Duration,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate playback time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<(String, SpeechTag)> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock-synthesizer"
    }

    async fn speak(&self, text: &str, tag: SpeechTag) -> Result<(), AbaError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.spoken
            .lock()
            .map_err(|e| AbaError::Voice(format!("synthesizer mutex poisoned: {}", e)))?
            .push((text.to_string(), tag));
        Ok(())
    }
}

//! Voice bridge: the narrow interface the assistant uses for speech I/O.

use std::sync::atomic::{AtomicUsize, Ordering};

use aba_core::error::AbaError;
use aba_core::events::{DomainEvent, EventBus};
use aba_core::types::SpeechTag;
use chrono::Utc;

use crate::capability::{Capability, SpeechRecognizer, SpeechSynthesizer};
use crate::state::{ListenState, ListenStateMachine};

/// Adapts host speech capabilities for the assistant.
///
/// Every failure here is soft: callers report it to the traveller and keep
/// the text path running.
pub struct VoiceBridge {
    recognizer: Capability<dyn SpeechRecognizer>,
    synthesizer: Capability<dyn SpeechSynthesizer>,
    listen_state: ListenStateMachine,
    active_playbacks: AtomicUsize,
    events: EventBus,
}

impl std::fmt::Debug for VoiceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceBridge")
            .field("recognizer", &self.recognizer)
            .field("synthesizer", &self.synthesizer)
            .field("listen_state", &self.listen_state.current())
            .finish()
    }
}

/// Returns the listen state to Idle when a recognition session ends, even if
/// the caller's future is dropped mid-session.
struct ListeningGuard<'a>(&'a ListenStateMachine);

impl Drop for ListeningGuard<'_> {
    fn drop(&mut self) {
        let _ = self.0.transition(ListenState::Idle);
    }
}

struct PlaybackGuard<'a>(&'a AtomicUsize);

impl Drop for PlaybackGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl VoiceBridge {
    pub fn new(
        recognizer: Capability<dyn SpeechRecognizer>,
        synthesizer: Capability<dyn SpeechSynthesizer>,
        events: EventBus,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            listen_state: ListenStateMachine::new(),
            active_playbacks: AtomicUsize::new(0),
            events,
        }
    }

    /// A bridge for hosts with no speech support at all.
    pub fn unsupported(events: EventBus) -> Self {
        Self::new(Capability::Unsupported, Capability::Unsupported, events)
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_available()
    }

    pub fn is_listening(&self) -> bool {
        self.listen_state.current() == ListenState::Listening
    }

    pub fn is_speaking(&self) -> bool {
        self.active_playbacks.load(Ordering::SeqCst) > 0
    }

    /// Run one recognition session and return the final transcript.
    ///
    /// Fails with [`AbaError::VoiceUnsupported`] when the host has no
    /// recognizer and with [`AbaError::VoiceBusy`] while another session is
    /// still listening.
    pub async fn start_listening(&self, tag: SpeechTag) -> Result<String, AbaError> {
        let Some(recognizer) = self.recognizer.get() else {
            tracing::warn!("Voice recognition not supported on this host");
            return Err(AbaError::voice_unsupported("recognition"));
        };

        self.listen_state.transition(ListenState::Listening)?;
        let _guard = ListeningGuard(&self.listen_state);

        tracing::info!(tag = %tag, backend = recognizer.name(), "Listening started");
        self.events.publish(DomainEvent::ListeningStarted {
            tag,
            timestamp: Utc::now(),
        });

        let result = recognizer
            .recognize(tag)
            .await
            .and_then(|text| {
                let text = text.trim().to_string();
                if text.is_empty() {
                    Err(AbaError::Voice("no speech detected".to_string()))
                } else {
                    Ok(text)
                }
            });

        match &result {
            Ok(text) => tracing::info!(text_len = text.len(), "Utterance recognized"),
            Err(e) => tracing::warn!(error = %e, "Voice recognition failed"),
        }
        self.events.publish(DomainEvent::ListeningEnded {
            recognized: result.is_ok(),
            timestamp: Utc::now(),
        });

        result
    }

    /// Speak `text`, publishing start and end notifications around playback.
    ///
    /// Blank text is a no-op.
    pub async fn speak(&self, text: &str, tag: SpeechTag) -> Result<(), AbaError> {
        let Some(synthesizer) = self.synthesizer.get() else {
            tracing::warn!("Speech synthesis not supported on this host");
            return Err(AbaError::voice_unsupported("synthesis"));
        };
        if text.trim().is_empty() {
            return Ok(());
        }

        self.active_playbacks.fetch_add(1, Ordering::SeqCst);
        let _guard = PlaybackGuard(&self.active_playbacks);

        tracing::debug!(tag = %tag, backend = synthesizer.name(), text_len = text.len(), "Speaking");
        self.events.publish(DomainEvent::SpeakingStarted {
            tag,
            timestamp: Utc::now(),
        });

        let result = synthesizer.speak(text, tag).await;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "Speech playback failed");
        }

        self.events.publish(DomainEvent::SpeakingEnded {
            timestamp: Utc::now(),
        });
        result
    }
}

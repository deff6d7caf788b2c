//! Travel assistant: wires classifier, composer and session together and
//! delivers assistant turns after the "thinking" delay.
//!
//! Sends are serialized. Each send holds an owned permit on `send_gate`
//! until its assistant turn lands or is cancelled; the permit lives inside
//! the spawned response task, so dropping the caller's future does not let
//! a second send overtake the pending one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use aba_core::config::ChatConfig;
use aba_core::events::{DomainEvent, EventBus};
use aba_core::types::{Language, SpeechTag, Turn};
use aba_location::LocationCoordinator;
use chrono::Utc;
use tokio::sync::{Notify, OwnedMutexGuard};
use uuid::Uuid;

use crate::classifier::{ClassificationResult, IntentClassifier};
use crate::error::ChatError;
use crate::export;
use crate::response::ResponseComposer;
use crate::session::{EmergencyDispatch, Session};
use crate::store::SessionSummary;

/// What a send produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended.
    Ignored,
    /// The user turn and the assistant turn delivered after the delay.
    Answered { user: Turn, assistant: Turn },
}

type PendingSlot = Arc<Mutex<Option<Arc<Notify>>>>;

/// Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct TravelAssistant {
    classifier: IntentClassifier,
    composer: ResponseComposer,
    session: Arc<Mutex<Session>>,
    send_gate: Arc<tokio::sync::Mutex<()>>,
    pending: PendingSlot,
    events: EventBus,
    config: ChatConfig,
}

impl TravelAssistant {
    pub fn new(config: ChatConfig, session: Session) -> Self {
        let events = session.events().clone();
        tracing::info!(
            session_id = %session.id(),
            delay_ms = config.response_delay_ms,
            "Travel assistant ready"
        );
        Self {
            classifier: IntentClassifier::new(),
            composer: ResponseComposer::new(),
            session: Arc::new(Mutex::new(session)),
            send_gate: Arc::new(tokio::sync::Mutex::new(())),
            pending: Arc::new(Mutex::new(None)),
            events,
            config,
        }
    }

    pub fn classify(&self, utterance: &str) -> ClassificationResult {
        self.classifier.classify(utterance)
    }

    /// Classify and compose without touching the session.
    pub fn respond(&self, utterance: &str) -> String {
        self.composer.compose(&self.classify(utterance))
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Append the user turn, then wait for the assistant turn.
    ///
    /// Queues behind a send that is still waiting for its response. Blank
    /// input is ignored without touching the session.
    pub async fn handle_send(&self, text: &str) -> Result<SendOutcome, ChatError> {
        let Some(text) = self.validate(text)? else {
            return Ok(SendOutcome::Ignored);
        };
        let permit = Arc::clone(&self.send_gate).lock_owned().await;
        self.dispatch(text, permit).await
    }

    /// Like [`handle_send`](Self::handle_send), but fails with
    /// [`ChatError::ResponsePending`] instead of queueing.
    pub async fn try_send(&self, text: &str) -> Result<SendOutcome, ChatError> {
        let Some(text) = self.validate(text)? else {
            return Ok(SendOutcome::Ignored);
        };
        let permit = Arc::clone(&self.send_gate)
            .try_lock_owned()
            .map_err(|_| ChatError::ResponsePending)?;
        self.dispatch(text, permit).await
    }

    fn validate(&self, text: &str) -> Result<Option<String>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring blank input");
            return Ok(None);
        }
        let max = self.config.max_message_length;
        if text.chars().count() > max {
            return Err(ChatError::MessageTooLong(max));
        }
        Ok(Some(text.to_string()))
    }

    async fn dispatch(
        &self,
        text: String,
        permit: OwnedMutexGuard<()>,
    ) -> Result<SendOutcome, ChatError> {
        let user = self.lock_session()?.append_user(&text)?;
        let reply = self.respond(&text);

        let cancel = Arc::new(Notify::new());
        *lock_pending(&self.pending)? = Some(Arc::clone(&cancel));

        tracing::debug!(delay_ms = self.config.response_delay_ms, "Response scheduled");
        self.events.publish(DomainEvent::ResponseScheduled {
            delay_ms: self.config.response_delay_ms,
            timestamp: Utc::now(),
        });

        let task = tokio::spawn(deliver_after(
            self.config.response_delay(),
            reply,
            cancel,
            Arc::clone(&self.session),
            Arc::clone(&self.pending),
            self.events.clone(),
            permit,
        ));
        let assistant = task
            .await
            .map_err(|e| ChatError::Core(format!("response task failed: {}", e)))??;

        Ok(SendOutcome::Answered { user, assistant })
    }

    /// Cancel the response that is waiting out its delay, if any.
    ///
    /// Returns `true` only when the assistant turn will not be appended.
    pub fn cancel_pending(&self) -> bool {
        let cancel = match lock_pending(&self.pending) {
            Ok(mut slot) => slot.take(),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot cancel pending response");
                None
            }
        };
        match cancel {
            Some(cancel) => {
                cancel.notify_one();
                true
            }
            None => false,
        }
    }

    pub fn is_responding(&self) -> bool {
        lock_pending(&self.pending)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Cancel any pending response and close the session. Returns `false` if
    /// the session was already closed.
    pub fn end_session(&self) -> Result<bool, ChatError> {
        self.cancel_pending();
        Ok(self.lock_session()?.close())
    }

    // =========================================================================
    // Session access
    // =========================================================================

    pub fn session_id(&self) -> Result<Uuid, ChatError> {
        Ok(self.lock_session()?.id())
    }

    pub fn turns(&self) -> Result<Vec<Turn>, ChatError> {
        Ok(self.lock_session()?.turns().to_vec())
    }

    pub fn last_answer(&self) -> Result<Option<String>, ChatError> {
        Ok(self
            .lock_session()?
            .store()
            .last_assistant_turn()
            .map(|t| t.text().to_string()))
    }

    pub fn summary(&self) -> Result<Option<SessionSummary>, ChatError> {
        Ok(self.lock_session()?.summary())
    }

    pub fn language(&self) -> Result<Language, ChatError> {
        Ok(self.lock_session()?.language())
    }

    pub fn set_language(&self, language: Language) -> Result<(), ChatError> {
        self.lock_session()?.set_language(language);
        Ok(())
    }

    pub fn speech_tag(&self) -> Result<SpeechTag, ChatError> {
        Ok(self.lock_session()?.speech_tag())
    }

    pub fn location(&self) -> Result<LocationCoordinator, ChatError> {
        Ok(self.lock_session()?.location().clone())
    }

    pub fn trigger_emergency(&self) -> Result<EmergencyDispatch, ChatError> {
        self.lock_session()?.trigger_emergency()
    }

    pub fn export_transcript(&self) -> Result<String, ChatError> {
        Ok(self.lock_session()?.store().export_transcript())
    }

    /// Write the transcript to a new file in `dir`.
    pub fn save_transcript(&self, dir: &Path, app_name: &str) -> Result<PathBuf, ChatError> {
        let transcript = {
            let session = self.lock_session()?;
            if session.store().is_empty() {
                return Err(ChatError::Export("no conversation to export yet".to_string()));
            }
            session.store().export_transcript()
        };
        export::write_transcript(dir, app_name, &transcript)
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>, ChatError> {
        lock_session(&self.session)
    }
}

impl std::fmt::Debug for TravelAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelAssistant")
            .field("config", &self.config)
            .field("responding", &self.is_responding())
            .finish()
    }
}

/// Body of the spawned response task. Holds the send permit until it ends.
async fn deliver_after(
    delay: Duration,
    reply: String,
    cancel: Arc<Notify>,
    session: Arc<Mutex<Session>>,
    pending: PendingSlot,
    events: EventBus,
    _permit: OwnedMutexGuard<()>,
) -> Result<Turn, ChatError> {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel.notified() => {}
    }

    // Whoever empties the pending slot first decides the outcome: this task
    // delivers, or `cancel_pending` has already claimed the cancellation.
    let mut slot = lock_pending(&pending)?;
    if !slot.as_ref().is_some_and(|c| Arc::ptr_eq(c, &cancel)) {
        drop(slot);
        tracing::info!("Pending response cancelled");
        events.publish(DomainEvent::ResponseCancelled {
            timestamp: Utc::now(),
        });
        return Err(ChatError::ResponseCancelled);
    }
    *slot = None;
    lock_session(&session).and_then(|mut s| s.append_assistant(&reply))
}

fn lock_session(session: &Mutex<Session>) -> Result<MutexGuard<'_, Session>, ChatError> {
    session
        .lock()
        .map_err(|e| ChatError::Core(format!("session lock poisoned: {}", e)))
}

fn lock_pending(pending: &PendingSlot) -> Result<MutexGuard<'_, Option<Arc<Notify>>>, ChatError> {
    pending
        .lock()
        .map_err(|e| ChatError::Core(format!("pending lock poisoned: {}", e)))
}

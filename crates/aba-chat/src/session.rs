//! A single in-memory conversation.

use aba_core::events::{DomainEvent, EventBus};
use aba_core::types::{Language, SpeechTag, Turn};
use aba_location::{EmergencyNumber, LocationCoordinator, EMERGENCY_NUMBERS};
use chrono::Utc;
use uuid::Uuid;

use crate::error::ChatError;
use crate::store::{ConversationStore, SessionSummary};

/// Result of a successful emergency trigger.
#[derive(Debug, Clone)]
pub struct EmergencyDispatch {
    /// The system turn appended to the conversation.
    pub turn: Turn,
    /// Confirmation shown to the traveller.
    pub confirmation: String,
    pub numbers: &'static [EmergencyNumber],
}

/// Conversation history, language preference and location of one run.
///
/// Once closed, every append fails with [`ChatError::SessionClosed`].
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: ConversationStore,
    language: Language,
    location: LocationCoordinator,
    events: EventBus,
    closed: bool,
}

impl Session {
    pub fn new(location: LocationCoordinator, events: EventBus) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: ConversationStore::new(),
            language: Language::default(),
            location,
            events,
            closed: false,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        tracing::info!(from = %self.language, to = %language, "Language changed");
        self.language = language;
    }

    pub fn speech_tag(&self) -> SpeechTag {
        self.language.speech_tag()
    }

    pub fn location(&self) -> &LocationCoordinator {
        &self.location
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn turns(&self) -> &[Turn] {
        self.store.all_turns()
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.store.summary()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn append_user(&mut self, text: &str) -> Result<Turn, ChatError> {
        self.ensure_open()?;
        let turn = self.store.append_user(text);
        self.announce(&turn);
        Ok(turn)
    }

    pub fn append_assistant(&mut self, text: &str) -> Result<Turn, ChatError> {
        self.ensure_open()?;
        let turn = self.store.append_assistant(text);
        self.announce(&turn);
        Ok(turn)
    }

    /// Append the emergency alert for the acquired position.
    ///
    /// Fails with [`ChatError::LocationUnavailable`] and appends nothing when
    /// no position has been acquired.
    pub fn trigger_emergency(&mut self) -> Result<EmergencyDispatch, ChatError> {
        self.ensure_open()?;
        let alert = self.location.prepare_alert().inspect_err(|_| {
            tracing::warn!(session_id = %self.id, "Emergency requested without a location fix");
        })?;

        let turn = self.store.append_system(alert.turn_text());
        self.announce(&turn);

        tracing::info!(
            session_id = %self.id,
            lat = alert.coordinates.lat,
            lng = alert.coordinates.lng,
            "Emergency alert dispatched"
        );
        self.events.publish(DomainEvent::EmergencyDispatched {
            coordinates: alert.coordinates,
            timestamp: Utc::now(),
        });

        Ok(EmergencyDispatch {
            turn,
            confirmation: alert.confirmation(),
            numbers: &EMERGENCY_NUMBERS,
        })
    }

    /// Close the session. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        tracing::info!(session_id = %self.id, turns = self.store.len(), "Session ended");
        self.events.publish(DomainEvent::SessionEnded {
            session_id: self.id,
            turn_count: self.store.len(),
            timestamp: Utc::now(),
        });
        true
    }

    fn ensure_open(&self) -> Result<(), ChatError> {
        if self.closed {
            Err(ChatError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn announce(&self, turn: &Turn) {
        self.events.publish(DomainEvent::TurnAppended {
            turn_id: turn.id(),
            role: turn.role(),
            timestamp: turn.created_at(),
        });
    }
}

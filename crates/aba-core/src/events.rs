use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::{Coordinates, Role, SpeechTag};

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// All domain events that can occur while a session is running.
///
/// Events are emitted after state changes and consumed by the host to drive
/// indicators such as "listening" and "speaking", and by tests that need to
/// observe start/end notifications.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DomainEvent {
    // =========================================================================
    // Conversation Events
    // =========================================================================
    /// A turn was appended to the conversation store.
    TurnAppended {
        turn_id: Uuid,
        role: Role,
        timestamp: DateTime<Utc>,
    },

    /// An assistant response was scheduled after the thinking delay.
    ResponseScheduled {
        delay_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// A pending assistant response was cancelled before delivery.
    ResponseCancelled { timestamp: DateTime<Utc> },

    /// The session ended; no further turns will be appended.
    SessionEnded {
        session_id: Uuid,
        turn_count: usize,
        timestamp: DateTime<Utc>,
    },

    // =========================================================================
    // Location Events
    // =========================================================================
    /// The one-shot position request succeeded.
    LocationAcquired {
        coordinates: Coordinates,
        timestamp: DateTime<Utc>,
    },

    /// The one-shot position request was denied or failed.
    LocationUnavailable {
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// An emergency alert was appended to the conversation.
    EmergencyDispatched {
        coordinates: Coordinates,
        timestamp: DateTime<Utc>,
    },

    // =========================================================================
    // Voice Events
    // =========================================================================
    ListeningStarted {
        tag: SpeechTag,
        timestamp: DateTime<Utc>,
    },

    ListeningEnded {
        recognized: bool,
        timestamp: DateTime<Utc>,
    },

    SpeakingStarted {
        tag: SpeechTag,
        timestamp: DateTime<Utc>,
    },

    SpeakingEnded { timestamp: DateTime<Utc> },
}

impl DomainEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::TurnAppended { timestamp, .. }
            | DomainEvent::ResponseScheduled { timestamp, .. }
            | DomainEvent::ResponseCancelled { timestamp }
            | DomainEvent::SessionEnded { timestamp, .. }
            | DomainEvent::LocationAcquired { timestamp, .. }
            | DomainEvent::LocationUnavailable { timestamp, .. }
            | DomainEvent::EmergencyDispatched { timestamp, .. }
            | DomainEvent::ListeningStarted { timestamp, .. }
            | DomainEvent::ListeningEnded { timestamp, .. }
            | DomainEvent::SpeakingStarted { timestamp, .. }
            | DomainEvent::SpeakingEnded { timestamp } => *timestamp,
        }
    }

    /// Returns a short event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            DomainEvent::TurnAppended { .. } => "turn_appended",
            DomainEvent::ResponseScheduled { .. } => "response_scheduled",
            DomainEvent::ResponseCancelled { .. } => "response_cancelled",
            DomainEvent::SessionEnded { .. } => "session_ended",
            DomainEvent::LocationAcquired { .. } => "location_acquired",
            DomainEvent::LocationUnavailable { .. } => "location_unavailable",
            DomainEvent::EmergencyDispatched { .. } => "emergency_dispatched",
            DomainEvent::ListeningStarted { .. } => "listening_started",
            DomainEvent::ListeningEnded { .. } => "listening_ended",
            DomainEvent::SpeakingStarted { .. } => "speaking_started",
            DomainEvent::SpeakingEnded { .. } => "speaking_ended",
        }
    }
}

/// Cloneable broadcast handle for [`DomainEvent`]s.
///
/// Publishing never fails: events emitted while nobody is subscribed are
/// dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: DomainEvent) {
        tracing::trace!(event = event.event_name(), "Domain event");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();
        let cases = vec![
            (
                DomainEvent::TurnAppended {
                    turn_id: Uuid::new_v4(),
                    role: Role::User,
                    timestamp: now,
                },
                "turn_appended",
            ),
            (
                DomainEvent::ResponseCancelled { timestamp: now },
                "response_cancelled",
            ),
            (
                DomainEvent::ListeningStarted {
                    tag: SpeechTag::KaGe,
                    timestamp: now,
                },
                "listening_started",
            ),
            (DomainEvent::SpeakingEnded { timestamp: now }, "speaking_ended"),
        ];

        for (event, name) in cases {
            assert_eq!(event.event_name(), name);
            assert_eq!(event.timestamp(), now);
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(DomainEvent::SpeakingEnded {
            timestamp: Utc::now(),
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::SpeakingStarted {
            tag: SpeechTag::EnUs,
            timestamp: Utc::now(),
        });
        bus.publish(DomainEvent::SpeakingEnded {
            timestamp: Utc::now(),
        });

        assert_eq!(rx.recv().await.unwrap().event_name(), "speaking_started");
        assert_eq!(rx.recv().await.unwrap().event_name(), "speaking_ended");
    }

    #[test]
    fn test_cloned_bus_shares_channel() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.publish(DomainEvent::ResponseCancelled {
            timestamp: Utc::now(),
        });
        assert!(rx.try_recv().is_ok());
    }
}

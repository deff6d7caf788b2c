//! One-shot location coordinator.
//!
//! Valid transitions:
//! - Unacquired -> Acquired (position received)
//! - Unacquired -> Unavailable (permission denied or host error)
//!
//! Both targets are terminal: there are no retries and no way back.

use std::fmt;
use std::sync::{Arc, Mutex};

use aba_core::error::AbaError;
use aba_core::events::{DomainEvent, EventBus};
use aba_core::types::Coordinates;
use chrono::Utc;
use tokio::task::JoinHandle;

use crate::emergency::EmergencyAlert;
use crate::provider::GeolocationProvider;

/// Where the session stands on knowing the traveller's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    /// No answer from the host yet (possibly never).
    Unacquired,
    /// Position received; fixed for the rest of the session.
    Acquired(Coordinates),
    /// The host refused or failed to provide a position.
    Unavailable,
}

impl fmt::Display for LocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationState::Unacquired => write!(f, "Unacquired"),
            LocationState::Acquired(_) => write!(f, "Acquired"),
            LocationState::Unavailable => write!(f, "Unavailable"),
        }
    }
}

impl LocationState {
    pub fn can_transition_to(&self, target: &LocationState) -> bool {
        matches!(
            (self, target),
            (LocationState::Unacquired, LocationState::Acquired(_))
                | (LocationState::Unacquired, LocationState::Unavailable)
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LocationState::Unacquired)
    }
}

/// Shared handle on the session's location state.
///
/// Clones share the same state, so the startup acquisition task and the
/// session observe the same fix.
#[derive(Debug, Clone)]
pub struct LocationCoordinator {
    state: Arc<Mutex<LocationState>>,
    events: EventBus,
}

impl LocationCoordinator {
    pub fn new(events: EventBus) -> Self {
        Self {
            state: Arc::new(Mutex::new(LocationState::Unacquired)),
            events,
        }
    }

    /// Current state. A poisoned lock reads as `Unavailable`.
    pub fn state(&self) -> LocationState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(LocationState::Unavailable)
    }

    /// The acquired position, or [`AbaError::LocationUnavailable`] when the
    /// state is `Unacquired` or `Unavailable`.
    pub fn coordinates(&self) -> Result<Coordinates, AbaError> {
        match self.state() {
            LocationState::Acquired(coords) => Ok(coords),
            LocationState::Unacquired | LocationState::Unavailable => {
                Err(AbaError::LocationUnavailable)
            }
        }
    }

    /// Build the emergency alert for the acquired position.
    pub fn prepare_alert(&self) -> Result<EmergencyAlert, AbaError> {
        self.coordinates().map(EmergencyAlert::new)
    }

    /// Record a successful fix. Returns `false` if the state was already
    /// terminal and the fix was ignored.
    pub fn record_fix(&self, coordinates: Coordinates) -> bool {
        if !self.apply(LocationState::Acquired(coordinates)) {
            return false;
        }
        tracing::info!(lat = coordinates.lat, lng = coordinates.lng, "Location acquired");
        self.events.publish(DomainEvent::LocationAcquired {
            coordinates,
            timestamp: Utc::now(),
        });
        true
    }

    /// Record a denial or host error. Returns `false` if the state was
    /// already terminal.
    pub fn record_failure(&self, reason: &str) -> bool {
        if !self.apply(LocationState::Unavailable) {
            return false;
        }
        tracing::info!(reason, "Location access denied");
        self.events.publish(DomainEvent::LocationUnavailable {
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
        true
    }

    /// Ask `provider` for the current position exactly once and record the
    /// outcome.
    pub async fn acquire<P: GeolocationProvider>(&self, provider: &P) -> LocationState {
        if self.state().is_terminal() {
            tracing::debug!(state = %self.state(), "Location already resolved, not asking again");
            return self.state();
        }
        match provider.current_position().await {
            Ok(coords) => {
                self.record_fix(coords);
            }
            Err(e) => {
                self.record_failure(&e.to_string());
            }
        }
        self.state()
    }

    /// Run [`acquire`](Self::acquire) in the background.
    ///
    /// Nothing waits on the returned handle; a provider that never answers
    /// simply leaves the coordinator `Unacquired`.
    pub fn spawn_acquisition<P>(&self, provider: P) -> JoinHandle<LocationState>
    where
        P: GeolocationProvider + 'static,
    {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.acquire(&provider).await })
    }

    /// Human-readable position with a map link, for the quick guide.
    pub fn describe(&self) -> Option<String> {
        match self.state() {
            LocationState::Acquired(c) => Some(format!(
                "Lat: {:.4}, Lng: {:.4}\nOpen in Google Maps: {}",
                c.lat,
                c.lng,
                c.map_link()
            )),
            _ => None,
        }
    }

    fn apply(&self, target: LocationState) -> bool {
        let Ok(mut state) = self.state.lock() else {
            tracing::warn!("Location state mutex poisoned");
            return false;
        };
        if state.can_transition_to(&target) {
            *state = target;
            true
        } else {
            tracing::warn!(from = %*state, to = %target, "Ignoring location update");
            false
        }
    }
}

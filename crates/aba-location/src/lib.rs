//! ABA Travel location crate - one-shot geolocation and emergency alerts.
//!
//! Provides the [`GeolocationProvider`] trait with fixed, denied and
//! never-answering implementations, the [`LocationCoordinator`] state machine
//! (Unacquired -> Acquired | Unavailable, both terminal), and the emergency
//! alert text with the regional emergency numbers.

pub mod coordinator;
pub mod emergency;
pub mod provider;

pub use coordinator::{LocationCoordinator, LocationState};
pub use emergency::{EmergencyAlert, EmergencyNumber, EMERGENCY_NUMBERS};
pub use provider::{DeniedProvider, FixedPositionProvider, GeolocationProvider, PendingProvider};

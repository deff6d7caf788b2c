//! ABA Travel voice crate - speech capability adapters for the assistant.
//!
//! Speech recognition and synthesis are host-provided and may be missing.
//! Each is injected as a [`Capability`] with an explicit `Unsupported`
//! variant; the [`VoiceBridge`] enforces a single listening session at a
//! time and publishes start/end notifications on the shared event bus.

pub mod bridge;
pub mod capability;
pub mod mock;
pub mod state;

pub use bridge::VoiceBridge;
pub use capability::{Capability, SpeechRecognizer, SpeechSynthesizer};
pub use mock::{MockRecognizer, MockSynthesizer};
pub use state::{ListenState, ListenStateMachine};

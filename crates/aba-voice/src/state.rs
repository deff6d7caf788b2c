//! Listening state machine with thread-safe transitions.
//!
//! Enforces a single recognition session at a time:
//! - Idle -> Listening (start recognition)
//! - Listening -> Idle (utterance recognized, failed, or cancelled)

use std::fmt;
use std::sync::{Arc, Mutex};

use aba_core::error::AbaError;

/// Operational state of speech recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenState {
    /// No recognition in progress. Ready to start.
    Idle,
    /// Waiting for the host to deliver an utterance.
    Listening,
}

impl fmt::Display for ListenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenState::Idle => write!(f, "Idle"),
            ListenState::Listening => write!(f, "Listening"),
        }
    }
}

impl ListenState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &ListenState) -> bool {
        matches!(
            (self, target),
            (ListenState::Idle, ListenState::Listening) | (ListenState::Listening, ListenState::Idle)
        )
    }
}

/// Shared state machine for the listening lifecycle.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct ListenStateMachine {
    state: Arc<Mutex<ListenState>>,
}

impl Default for ListenStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenStateMachine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ListenState::Idle)),
        }
    }

    /// Returns the current state. A poisoned lock reads as `Idle`.
    pub fn current(&self) -> ListenState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(ListenState::Idle)
    }

    /// Attempt to transition to the target state.
    ///
    /// Starting while already listening yields [`AbaError::VoiceBusy`]; any
    /// other invalid transition yields [`AbaError::Voice`].
    pub fn transition(&self, target: ListenState) -> Result<(), AbaError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| AbaError::Voice(format!("listen state mutex poisoned: {}", e)))?;
        if state.can_transition_to(&target) {
            tracing::debug!("Listen state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else if *state == ListenState::Listening {
            Err(AbaError::VoiceBusy)
        } else {
            Err(AbaError::Voice(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(ListenState::Idle.to_string(), "Idle");
        assert_eq!(ListenState::Listening.to_string(), "Listening");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(ListenState::Idle.can_transition_to(&ListenState::Listening));
        assert!(ListenState::Listening.can_transition_to(&ListenState::Idle));
    }

    #[test]
    fn test_self_transitions_invalid() {
        assert!(!ListenState::Idle.can_transition_to(&ListenState::Idle));
        assert!(!ListenState::Listening.can_transition_to(&ListenState::Listening));
    }

    #[test]
    fn test_state_machine_round_trip() {
        let sm = ListenStateMachine::new();
        assert_eq!(sm.current(), ListenState::Idle);
        sm.transition(ListenState::Listening).unwrap();
        assert_eq!(sm.current(), ListenState::Listening);
        sm.transition(ListenState::Idle).unwrap();
        assert_eq!(sm.current(), ListenState::Idle);
    }

    #[test]
    fn test_second_listen_is_busy() {
        let sm = ListenStateMachine::new();
        sm.transition(ListenState::Listening).unwrap();
        let result = sm.transition(ListenState::Listening);
        assert!(matches!(result, Err(AbaError::VoiceBusy)));
        assert_eq!(sm.current(), ListenState::Listening);
    }

    #[test]
    fn test_idle_to_idle_is_error() {
        let sm = ListenStateMachine::new();
        match sm.transition(ListenState::Idle) {
            Err(AbaError::Voice(msg)) => {
                assert!(msg.contains("Idle -> Idle"));
            }
            other => panic!("Expected Voice error, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_is_shared() {
        let sm1 = ListenStateMachine::new();
        let sm2 = sm1.clone();
        sm1.transition(ListenState::Listening).unwrap();
        assert_eq!(sm2.current(), ListenState::Listening);
    }
}

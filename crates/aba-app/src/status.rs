//! Status indicators driven by the event bus.

use aba_core::events::{DomainEvent, EventBus};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// The indicator line for `event`, if it has one.
pub fn status_line(event: &DomainEvent) -> Option<String> {
    match event {
        DomainEvent::ListeningStarted { tag, .. } => Some(format!("🎤 Listening ({})...", tag)),
        DomainEvent::ListeningEnded {
            recognized: false, ..
        } => Some("🎤 No speech recognized".to_string()),
        DomainEvent::SpeakingStarted { .. } => Some("🔊 Speaking...".to_string()),
        DomainEvent::LocationAcquired { .. } => Some("📍 Location acquired".to_string()),
        DomainEvent::LocationUnavailable { .. } => {
            Some("📍 Location unavailable, /sos will not work this session".to_string())
        }
        _ => None,
    }
}

/// Print indicator lines for every event published on `events`.
pub fn spawn_status_printer(events: &EventBus) -> JoinHandle<()> {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(line) = status_line(&event) {
                        println!("{}", line);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Status printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

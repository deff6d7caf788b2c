//! End-to-end tests for the travel assistant.
//!
//! Each test drives a fresh session through the public API: classification,
//! delayed delivery, emergency dispatch and transcript export.

use std::time::Duration;

use aba_chat::guide::{render_guide, STARTER_PROMPTS};
use aba_chat::{ChatError, SendOutcome, Session, TopicId, TravelAssistant};
use aba_core::config::ChatConfig;
use aba_core::events::{DomainEvent, EventBus};
use aba_core::types::{Coordinates, Role};
use aba_location::{
    DeniedProvider, FixedPositionProvider, LocationCoordinator, LocationState, PendingProvider,
};
use regex::Regex;

// =============================================================================
// Helpers
// =============================================================================

const TEST_DELAY_MS: u64 = 20;

fn make_assistant_with(delay_ms: u64) -> (TravelAssistant, EventBus) {
    let events = EventBus::new();
    let session = Session::new(LocationCoordinator::new(events.clone()), events.clone());
    let config = ChatConfig {
        response_delay_ms: delay_ms,
        ..ChatConfig::default()
    };
    (TravelAssistant::new(config, session), events)
}

fn make_assistant() -> TravelAssistant {
    make_assistant_with(TEST_DELAY_MS).0
}

fn tbilisi() -> Coordinates {
    Coordinates::new(41.7151, 44.8271)
}

async fn answer(assistant: &TravelAssistant, text: &str) -> String {
    match assistant.handle_send(text).await.unwrap() {
        SendOutcome::Answered { assistant, .. } => assistant.text().to_string(),
        SendOutcome::Ignored => panic!("'{}' was ignored", text),
    }
}

// =============================================================================
// Conversation
// =============================================================================

#[tokio::test]
async fn test_conversation_alternates_user_and_assistant() {
    let assistant = make_assistant();
    for text in ["Tell me about Tbilisi", "and the food?", "xyzzy plugh"] {
        answer(&assistant, text).await;
    }

    let roles: Vec<Role> = assistant.turns().unwrap().iter().map(|t| t.role()).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
}

#[tokio::test]
async fn test_priority_tie_break_end_to_end() {
    let assistant = make_assistant();
    let reply = answer(&assistant, "tell me about tbilisi and wine").await;
    assert_eq!(reply, assistant.respond("Tbilisi"));
    assert_eq!(
        assistant.classify("tell me about tbilisi and wine").matched_topic,
        Some(TopicId::Tbilisi)
    );
}

#[tokio::test]
async fn test_fallback_lists_categories() {
    let assistant = make_assistant();
    let reply = answer(&assistant, "xyzzy plugh").await;
    assert!(reply.contains("Historical sites"));
    assert!(reply.contains("Emergency assistance"));
}

#[tokio::test]
async fn test_same_input_same_reply() {
    let assistant = make_assistant();
    let first = answer(&assistant, "currency").await;
    let second = answer(&assistant, "currency").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reply_waits_for_delay() {
    let (assistant, _) = make_assistant_with(300);
    let send = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.handle_send("metro").await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let turns = assistant.turns().unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role(), Role::User);
    assert!(assistant.is_responding());

    send.await.unwrap().unwrap();
    assert_eq!(assistant.turns().unwrap().len(), 2);
}

#[tokio::test]
async fn test_queued_sends_keep_order() {
    let (assistant, _) = make_assistant_with(100);
    let first = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.handle_send("metro").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.handle_send("money").await })
    };

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let texts: Vec<String> = assistant
        .turns()
        .unwrap()
        .iter()
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[0], "metro");
    assert_eq!(texts[1], assistant.respond("metro"));
    assert_eq!(texts[2], "money");
    assert_eq!(texts[3], assistant.respond("money"));
}

#[tokio::test]
async fn test_dropped_caller_still_gets_reply_delivered() {
    let (assistant, _) = make_assistant_with(100);
    let caller = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.handle_send("wine").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    caller.abort();

    // The pending reply still holds the send permit.
    let queued = assistant.try_send("metro").await;
    assert!(matches!(queued, Err(ChatError::ResponsePending)));

    tokio::time::sleep(Duration::from_millis(200)).await;
    let turns = assistant.turns().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].role(), Role::Assistant);
}

#[tokio::test]
async fn test_empty_input_is_idempotent() {
    let assistant = make_assistant();
    answer(&assistant, "safety").await;
    let before = assistant.turns().unwrap();

    for _ in 0..3 {
        assert_eq!(
            assistant.handle_send("   ").await.unwrap(),
            SendOutcome::Ignored
        );
    }
    assert_eq!(assistant.turns().unwrap(), before);
}

#[tokio::test]
async fn test_end_session_cancels_pending_reply() {
    let (assistant, events) = make_assistant_with(5_000);
    let mut rx = events.subscribe();
    let send = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.handle_send("transport").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(assistant.end_session().unwrap());
    assert!(matches!(
        send.await.unwrap(),
        Err(ChatError::ResponseCancelled)
    ));
    assert_eq!(assistant.turns().unwrap().len(), 1);

    let names: Vec<&str> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|e| e.event_name())
        .collect();
    assert!(names.contains(&"response_cancelled"));
    assert!(names.contains(&"session_ended"));
}

// =============================================================================
// Emergency
// =============================================================================

#[tokio::test]
async fn test_emergency_before_location_resolves() {
    let assistant = make_assistant();
    let handle = assistant
        .location()
        .unwrap()
        .spawn_acquisition(PendingProvider);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let result = assistant.trigger_emergency();
    assert!(matches!(result, Err(ChatError::LocationUnavailable)));
    assert!(assistant.turns().unwrap().is_empty());
    handle.abort();
}

#[tokio::test]
async fn test_emergency_after_denial() {
    let assistant = make_assistant();
    let location = assistant.location().unwrap();
    assert_eq!(location.acquire(&DeniedProvider).await, LocationState::Unavailable);

    assert!(assistant.trigger_emergency().is_err());
    assert!(assistant.turns().unwrap().is_empty());
}

#[tokio::test]
async fn test_emergency_with_location() {
    let (assistant, events) = make_assistant_with(TEST_DELAY_MS);
    let mut rx = events.subscribe();
    assistant
        .location()
        .unwrap()
        .spawn_acquisition(FixedPositionProvider::new(tbilisi()))
        .await
        .unwrap();

    answer(&assistant, "is it safe here?").await;
    let dispatch = assistant.trigger_emergency().unwrap();

    let text = dispatch.turn.text();
    assert!(text.contains("41.7151"));
    assert!(text.contains("44.8271"));
    assert!(text.contains("https://maps.google.com/?q=41.7151,44.8271"));
    assert!(dispatch.confirmation.contains("Emergency services contacted!"));

    let turns = assistant.turns().unwrap();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2].role(), Role::System);

    let dispatched = std::iter::from_fn(|| rx.try_recv().ok()).any(|e| {
        matches!(e, DomainEvent::EmergencyDispatched { coordinates, .. } if coordinates == tbilisi())
    });
    assert!(dispatched);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_transcript_matches_turns() {
    let assistant = make_assistant();
    answer(&assistant, "Tell me about Tbilisi").await;
    answer(&assistant, "Basic Georgian phrases, please speak slowly").await;
    assistant
        .location()
        .unwrap()
        .acquire(&FixedPositionProvider::new(tbilisi()))
        .await;
    assistant.trigger_emergency().unwrap();

    let transcript = assistant.export_transcript().unwrap();
    let entries: Vec<&str> = transcript.split("\n\n").collect();
    assert_eq!(entries.len(), assistant.turns().unwrap().len());

    let shape = Regex::new(r"^\[\d{2}:\d{2}:\d{2}\] (USER|ASSISTANT|SYSTEM): .+").unwrap();
    for entry in &entries {
        assert!(shape.is_match(entry), "bad entry: {}", entry);
    }
    assert!(entries[4].contains("SYSTEM: 🚨 EMERGENCY ALERT"));
}

#[tokio::test]
async fn test_save_transcript_writes_file() {
    let assistant = make_assistant();
    answer(&assistant, STARTER_PROMPTS[0].prompt).await;

    let dir = tempfile::tempdir().unwrap();
    let path = assistant.save_transcript(dir.path(), "aba-travel").unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, assistant.export_transcript().unwrap());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(Regex::new(r"^aba-travel-transcript-\d+\.txt$")
        .unwrap()
        .is_match(&name));
}

#[tokio::test]
async fn test_guide_reflects_acquired_location() {
    let assistant = make_assistant();
    let location = assistant.location().unwrap();
    assert!(!render_guide(&location).contains("Your Location"));

    location
        .acquire(&FixedPositionProvider::new(tbilisi()))
        .await;
    assert!(render_guide(&location).contains("Lat: 41.7151, Lng: 44.8271"));
}

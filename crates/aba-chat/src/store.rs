//! Append-only conversation history.

use aba_core::types::{Role, Turn};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message count and start time of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub message_count: usize,
    pub started_at: DateTime<Utc>,
}

/// Ordered turns of one session. Turns are only ever appended.
#[derive(Debug, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> Turn {
        self.append(Role::User, text)
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) -> Turn {
        self.append(Role::Assistant, text)
    }

    pub fn append_system(&mut self, text: impl Into<String>) -> Turn {
        self.append(Role::System, text)
    }

    fn append(&mut self, role: Role, text: impl Into<String>) -> Turn {
        let turn = Turn::new(role, text);
        self.turns.push(turn.clone());
        turn
    }

    /// Every turn, in insertion order.
    pub fn all_turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_assistant_turn(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role() == Role::Assistant)
    }

    /// `None` until the first turn is appended.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.turns.first().map(|first| SessionSummary {
            message_count: self.turns.len(),
            started_at: first.created_at(),
        })
    }

    /// Plain-text transcript: one `[HH:MM:SS] ROLE: text` entry per turn,
    /// entries separated by a blank line.
    pub fn export_transcript(&self) -> String {
        self.turns
            .iter()
            .map(format_entry)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Blank lines inside the text are dropped so a blank line only ever
/// separates entries.
fn format_entry(turn: &Turn) -> String {
    let text = turn
        .text()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "[{}] {}: {}",
        turn.local_time().format("%H:%M:%S"),
        turn.role().label(),
        text
    )
}

//! Response composition.
//!
//! Turns a [`ClassificationResult`] into the assistant's reply text. Every
//! reply is non-empty and free of blank lines.

use crate::classifier::ClassificationResult;
use crate::knowledge::{DetailStyle, Topic};

// =============================================================================
// Help text
// =============================================================================

const HELP_INTRO: &str = "I'm your ABA Travel AI guide for Georgia! I can help you with:";

const HELP_CATEGORIES: [&str; 6] = [
    "🏛️ Historical sites and museums",
    "🍷 Food and wine recommendations",
    "🚇 Transportation tips",
    "💱 Currency and practical info",
    "🆘 Emergency assistance",
    "📍 Location-based guidance",
];

const HELP_OUTRO: &str = "What would you like to know about Georgia?";

// =============================================================================
// ResponseComposer
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the reply for a classification. Total: the fallback path
    /// yields the help text.
    pub fn compose(&self, result: &ClassificationResult) -> String {
        match result.matched_topic {
            Some(id) => self.render_topic(id.topic()),
            None => self.help_text(),
        }
    }

    /// History line, then the labelled details, then the optional note.
    pub fn render_topic(&self, topic: &Topic) -> String {
        let mut lines = vec![topic.history.to_string()];

        match topic.style {
            DetailStyle::Inline => {
                lines.push(format!(
                    "{}: {}",
                    topic.details_label,
                    topic.details.join(", ")
                ));
            }
            DetailStyle::Bulleted => {
                lines.push(format!("{}:", topic.details_label));
                lines.extend(topic.details.iter().map(|d| format!("• {}", d)));
            }
        }

        if let Some(note) = topic.note {
            lines.push(note.to_string());
        }
        lines.join("\n")
    }

    pub fn help_text(&self) -> String {
        let mut lines = Vec::with_capacity(HELP_CATEGORIES.len() + 2);
        lines.push(HELP_INTRO.to_string());
        lines.extend(HELP_CATEGORIES.iter().map(|c| c.to_string()));
        lines.push(HELP_OUTRO.to_string());
        lines.join("\n")
    }
}

//! Keyword intent classifier.
//!
//! An utterance matches a group when it contains any of the group's keywords,
//! ignoring case. Groups are tried in declaration order and the first match
//! wins, so "tbilisi and wine" resolves to Tbilisi.

use regex::Regex;
use std::sync::LazyLock;

use crate::knowledge::TopicId;

/// Keywords that route an utterance to one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub topic: TopicId,
}

/// Ordered by priority.
pub const KEYWORD_GROUPS: [KeywordGroup; 8] = [
    KeywordGroup {
        keywords: &["tbilisi", "capital"],
        topic: TopicId::Tbilisi,
    },
    KeywordGroup {
        keywords: &["narikala", "fortress"],
        topic: TopicId::Narikala,
    },
    KeywordGroup {
        keywords: &["mtskheta"],
        topic: TopicId::Mtskheta,
    },
    KeywordGroup {
        keywords: &["wine", "food"],
        topic: TopicId::WineFood,
    },
    KeywordGroup {
        keywords: &["currency", "money"],
        topic: TopicId::Currency,
    },
    KeywordGroup {
        keywords: &["transport", "metro"],
        topic: TopicId::Transport,
    },
    KeywordGroup {
        keywords: &["safety", "safe"],
        topic: TopicId::Safety,
    },
    KeywordGroup {
        keywords: &["language", "speak"],
        topic: TopicId::LanguagePhrases,
    },
];

// =============================================================================
// Compiled patterns (one case-insensitive alternation per group)
// =============================================================================

static GROUP_PATTERNS: LazyLock<Vec<(Regex, TopicId)>> = LazyLock::new(|| {
    KEYWORD_GROUPS
        .iter()
        .map(|group| {
            let alternation = group
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!("(?i)(?:{})", alternation);
            (
                Regex::new(&pattern).expect("Invalid keyword regex"),
                group.topic,
            )
        })
        .collect()
});

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    pub matched_topic: Option<TopicId>,
    pub fallback: bool,
}

impl ClassificationResult {
    pub fn matched(topic: TopicId) -> Self {
        Self {
            matched_topic: Some(topic),
            fallback: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            matched_topic: None,
            fallback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `utterance` to a topic. Pure and deterministic.
    pub fn classify(&self, utterance: &str) -> ClassificationResult {
        let result = GROUP_PATTERNS
            .iter()
            .find(|(pattern, _)| pattern.is_match(utterance))
            .map(|(_, topic)| ClassificationResult::matched(*topic))
            .unwrap_or_else(ClassificationResult::fallback);

        tracing::debug!(
            topic = result.matched_topic.map(|t| t.as_str()),
            fallback = result.fallback,
            "Utterance classified"
        );
        result
    }

    /// The ordered keyword table the classifier matches against.
    pub fn keyword_groups(&self) -> &'static [KeywordGroup] {
        &KEYWORD_GROUPS
    }
}

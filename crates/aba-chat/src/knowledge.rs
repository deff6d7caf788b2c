//! Static knowledge base about Georgia.
//!
//! Every entry is compiled in and read-only; lookups never fail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicId {
    Tbilisi,
    Narikala,
    Mtskheta,
    WineFood,
    Currency,
    Transport,
    Safety,
    LanguagePhrases,
}

impl TopicId {
    /// All topics, in the order they are stored in [`TOPICS`].
    pub const ALL: [TopicId; 8] = [
        TopicId::Tbilisi,
        TopicId::Narikala,
        TopicId::Mtskheta,
        TopicId::WineFood,
        TopicId::Currency,
        TopicId::Transport,
        TopicId::Safety,
        TopicId::LanguagePhrases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicId::Tbilisi => "tbilisi",
            TopicId::Narikala => "narikala",
            TopicId::Mtskheta => "mtskheta",
            TopicId::WineFood => "wine_food",
            TopicId::Currency => "currency",
            TopicId::Transport => "transport",
            TopicId::Safety => "safety",
            TopicId::LanguagePhrases => "language_phrases",
        }
    }

    pub fn topic(&self) -> &'static Topic {
        &TOPICS[*self as usize]
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a topic's details are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStyle {
    /// `Label: a, b, c`
    Inline,
    /// `Label:` followed by one `• item` per line.
    Bulleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: &'static str,
    pub history: &'static str,
    pub details_label: &'static str,
    pub details: &'static [&'static str],
    pub style: DetailStyle,
    pub note: Option<&'static str>,
}

pub static TOPICS: [Topic; 8] = [
    Topic {
        id: TopicId::Tbilisi,
        title: "Tbilisi",
        history: "Founded in the 5th century by King Vakhtang I Gorgasali, Tbilisi has been the capital of Georgia for most of its history. The name comes from \"tbili\" meaning warm, referring to the sulfur hot springs.",
        details_label: "Key attractions",
        details: &[
            "Narikala Fortress",
            "Old Town",
            "Sulfur Baths",
            "Peace Bridge",
            "Mtatsminda Park",
        ],
        style: DetailStyle::Inline,
        note: None,
    },
    Topic {
        id: TopicId::Narikala,
        title: "Narikala Fortress",
        history: "Dating back to the 4th century, Narikala is an ancient fortress overlooking Tbilisi. It was established by the Persians and expanded by the Umayyads in the 7th century.",
        details_label: "💡 Tips",
        details: &["Best visited at sunset", "Cable car available from Rike Park"],
        style: DetailStyle::Bulleted,
        note: None,
    },
    Topic {
        id: TopicId::Mtskheta,
        title: "Mtskheta",
        history: "One of the oldest cities in Georgia, founded in the 5th century BC. UNESCO World Heritage site and former capital of the early Kingdom of Iberia.",
        details_label: "Must-see",
        details: &[
            "Svetitskhoveli Cathedral",
            "Jvari Monastery",
            "Samtavro Monastery",
        ],
        style: DetailStyle::Inline,
        note: None,
    },
    Topic {
        id: TopicId::WineFood,
        title: "Food & Wine",
        history: "Georgia is the birthplace of wine with 8,000 years of winemaking tradition! Traditional methods use qvevri (clay vessels buried underground).",
        details_label: "Must-try foods",
        details: &[
            "Khachapuri (cheese bread)",
            "Khinkali (dumplings)",
            "Churchkhela (candle-shaped candy)",
        ],
        style: DetailStyle::Inline,
        note: None,
    },
    Topic {
        id: TopicId::Currency,
        title: "Currency & Money",
        history: "Georgian currency is the Lari (GEL).",
        details_label: "Good to know",
        details: &[
            "1 USD ≈ 2.7 GEL",
            "ATMs are widely available in cities",
            "Credit cards accepted in most hotels and restaurants",
        ],
        style: DetailStyle::Bulleted,
        note: None,
    },
    Topic {
        id: TopicId::Transport,
        title: "Getting Around",
        history: "Tbilisi has an efficient metro system (0.50 GEL per ride).",
        details_label: "Options",
        details: &[
            "Taxis are affordable: use the Bolt or Yandex apps",
            "Marshrutkas (minibuses) connect cities, very cheap but can be crowded",
        ],
        style: DetailStyle::Bulleted,
        note: None,
    },
    Topic {
        id: TopicId::Safety,
        title: "Safety",
        history: "Georgia is very safe for travelers! Low crime rate, and most Georgians are extremely hospitable.",
        details_label: "Keep in mind",
        details: &[
            "Emergency number: 112 (police, ambulance, fire)",
            "Keep normal precautions in crowded areas",
        ],
        style: DetailStyle::Bulleted,
        note: None,
    },
    Topic {
        id: TopicId::LanguagePhrases,
        title: "Georgian Language",
        history: "Georgian uses its own unique alphabet.",
        details_label: "Useful phrases",
        details: &[
            "Hello: Gamarjoba (გამარჯობა)",
            "Thank you: Madloba (მადლობა)",
            "Yes/No: Diakh/Ara (დიახ/არა)",
            "Cheers!: Gaumarjos! (გაუმარჯოს!)",
        ],
        style: DetailStyle::Bulleted,
        note: Some("Young people often speak English, especially in Tbilisi."),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_table_matches_ids() {
        for id in TopicId::ALL {
            assert_eq!(id.topic().id, id, "table out of order at {}", id);
        }
    }

    #[test]
    fn test_topic_ids_are_stable() {
        let ids: Vec<&str> = TopicId::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "tbilisi",
                "narikala",
                "mtskheta",
                "wine_food",
                "currency",
                "transport",
                "safety",
                "language_phrases"
            ]
        );
    }

    #[test]
    fn test_every_topic_has_content() {
        for topic in TOPICS.iter() {
            assert!(!topic.history.is_empty());
            assert!(!topic.details.is_empty());
            assert!(topic.details.iter().all(|d| !d.contains('\n')));
        }
    }

    #[test]
    fn test_phrases_carry_georgian_script() {
        let topic = TopicId::LanguagePhrases.topic();
        assert!(topic.details.iter().any(|d| d.contains("გამარჯობა")));
        assert!(topic.note.is_some());
    }
}

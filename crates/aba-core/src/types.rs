use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AbaError;

// =============================================================================
// Conversation
// =============================================================================

/// Who produced a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Text typed or spoken by the traveller.
    User,
    /// Canned answer produced by the assistant.
    Assistant,
    /// Notices raised by the app itself, e.g. emergency alerts.
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Upper-cased role name used in exported transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
            Role::System => "SYSTEM",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the conversation.
///
/// Turns are immutable once created: there are no setters, and the
/// conversation store only hands out clones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: Uuid,
    role: Role,
    text: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time in the host's local time zone.
    pub fn local_time(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }
}

// =============================================================================
// Language
// =============================================================================

/// Interface language selected by the traveller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ka")]
    Georgian,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
}

impl Language {
    /// Every supported language, in menu order.
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Georgian,
        Language::Russian,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Chinese,
        Language::Japanese,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Georgian => "ka",
            Language::Russian => "ru",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
        }
    }

    /// Name of the language as shown in the language picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Georgian => "ქართული (Georgian)",
            Language::Russian => "Русский",
            Language::German => "Deutsch",
            Language::French => "Français",
            Language::Spanish => "Español",
            Language::Chinese => "中文",
            Language::Japanese => "日本語",
        }
    }

    /// Speech tag used for recognition and synthesis.
    ///
    /// Only Georgian and Russian have dedicated voices; everything else is
    /// spoken and recognized as US English.
    pub fn speech_tag(&self) -> SpeechTag {
        match self {
            Language::Georgian => SpeechTag::KaGe,
            Language::Russian => SpeechTag::RuRu,
            _ => SpeechTag::EnUs,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = AbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| AbaError::Config(format!("unknown language code: {}", s)))
    }
}

/// BCP-47 tag handed to speech recognition and synthesis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechTag {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ka-GE")]
    KaGe,
    #[serde(rename = "ru-RU")]
    RuRu,
}

impl SpeechTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechTag::EnUs => "en-US",
            SpeechTag::KaGe => "ka-GE",
            SpeechTag::RuRu => "ru-RU",
        }
    }
}

impl fmt::Display for SpeechTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Location
// =============================================================================

/// A position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Map link for this position.
    pub fn map_link(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

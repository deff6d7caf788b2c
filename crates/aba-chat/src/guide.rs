//! Quick guide and conversation starters.

use aba_location::LocationCoordinator;

/// A canned question offered before the first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarterPrompt {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const STARTER_PROMPTS: [StarterPrompt; 4] = [
    StarterPrompt {
        label: "About Tbilisi",
        prompt: "Tell me about Tbilisi",
    },
    StarterPrompt {
        label: "Food & Wine",
        prompt: "What should I eat in Georgia?",
    },
    StarterPrompt {
        label: "Transportation",
        prompt: "How do I get around?",
    },
    StarterPrompt {
        label: "Learn Georgian",
        prompt: "Basic Georgian phrases",
    },
];

pub const WELCOME: &str = "Welcome to Georgia! 🇬🇪\nAsk me anything about Georgian history, attractions, food, or travel tips!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideSection {
    pub heading: &'static str,
    pub lines: &'static [&'static str],
}

pub const GUIDE_SECTIONS: [GuideSection; 3] = [
    GuideSection {
        heading: "🏛️ Top Attractions",
        lines: &[
            "• Tbilisi Old Town & Narikala Fortress",
            "• Mtskheta (UNESCO World Heritage)",
            "• Kazbegi Mountain & Gergeti Trinity Church",
            "• Batumi (Black Sea coast)",
            "• Uplistsikhe Cave Town",
        ],
    },
    GuideSection {
        heading: "🍷 Food & Drink",
        lines: &["Birthplace of wine (8,000 years)! Try Khachapuri, Khinkali, Mtsvadi, and traditional wines from Kakheti region."],
    },
    GuideSection {
        heading: "💡 Travel Tips",
        lines: &[
            "• Currency: Georgian Lari (GEL)",
            "• Emergency: 112 (all services)",
            "• Visa: Many nationalities get 1-year visa-free",
            "• Best time: May-October",
        ],
    },
];

/// Render the quick guide. The "Your Location" section only appears once a
/// position has been acquired.
pub fn render_guide(location: &LocationCoordinator) -> String {
    let mut blocks = vec!["Quick Guide to Georgia".to_string()];
    blocks.extend(
        GUIDE_SECTIONS
            .iter()
            .map(|s| format!("{}\n{}", s.heading, s.lines.join("\n"))),
    );
    if let Some(position) = location.describe() {
        blocks.push(format!("📍 Your Location\n{}", position));
    }
    blocks.join("\n\n")
}

/// Welcome text followed by the numbered starter prompts.
pub fn render_welcome() -> String {
    let mut lines = vec![WELCOME.to_string(), String::new()];
    lines.extend(
        STARTER_PROMPTS
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  {}. {}: \"{}\"", i + 1, s.label, s.prompt)),
    );
    lines.join("\n")
}

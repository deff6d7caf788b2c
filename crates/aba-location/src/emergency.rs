//! Emergency alert text and regional emergency numbers.

use aba_core::types::Coordinates;

/// A regional emergency service and the number that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyNumber {
    pub icon: &'static str,
    pub service: &'static str,
    pub number: &'static str,
}

/// Georgia routes every emergency service through 112.
pub const EMERGENCY_NUMBERS: [EmergencyNumber; 3] = [
    EmergencyNumber {
        icon: "🚓",
        service: "Police",
        number: "112",
    },
    EmergencyNumber {
        icon: "🚑",
        service: "Ambulance",
        number: "112",
    },
    EmergencyNumber {
        icon: "🚒",
        service: "Fire",
        number: "112",
    },
];

/// Emergency alert built from a known position.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyAlert {
    pub coordinates: Coordinates,
    pub map_link: String,
}

impl EmergencyAlert {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            map_link: coordinates.map_link(),
            coordinates,
        }
    }

    /// Text of the system turn appended to the conversation.
    pub fn turn_text(&self) -> String {
        format!(
            "🚨 EMERGENCY ALERT\nLocation: {}\nGoogle Maps: {}\nEmergency services have been notified.",
            self.coordinates, self.map_link
        )
    }

    /// Confirmation shown to the traveller once the alert is raised.
    pub fn confirmation(&self) -> String {
        let mut lines = vec![
            "Emergency services contacted!".to_string(),
            "Georgia Emergency Numbers:".to_string(),
        ];
        lines.extend(
            EMERGENCY_NUMBERS
                .iter()
                .map(|n| format!("{} {}: {}", n.icon, n.service, n.number)),
        );
        lines.join("\n")
    }
}

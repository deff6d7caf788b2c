//! Terminal command parsing.

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the assistant.
    Send(String),
    Voice,
    Speak,
    Sos,
    Export,
    /// `/lang` with an optional language code; no code lists the choices.
    Lang(Option<String>),
    Guide,
    Summary,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Send(line.to_string());
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match name.as_str() {
            "voice" | "mic" => Command::Voice,
            "speak" | "listen" => Command::Speak,
            "sos" | "emergency" => Command::Sos,
            "export" => Command::Export,
            "lang" | "language" => Command::Lang(arg),
            "guide" => Command::Guide,
            "summary" => Command::Summary,
            "history" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(name),
        }
    }
}

pub const HELP: &str = "\
Type a question about Georgia and press Enter.
Commands:
  /voice         ask by voice
  /speak         read the last answer aloud
  /sos           send an emergency alert with your location
  /export        save the conversation to a text file
  /lang [code]   switch language (en, ka, ru, de, fr, es, zh, ja)
  /guide         show the quick guide
  /summary       show the session summary
  /history       show the conversation so far
  /help          show this help
  /quit          end the session";

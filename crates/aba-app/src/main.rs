mod cli;
mod console;
mod repl;
mod status;

use std::path::PathBuf;

use aba_chat::guide::{render_guide, render_welcome};
use aba_chat::{ChatError, SendOutcome, Session, TravelAssistant};
use aba_core::config::AbaConfig;
use aba_core::events::EventBus;
use aba_core::types::{Language, Turn};
use aba_location::{DeniedProvider, FixedPositionProvider, LocationCoordinator};
use aba_voice::{Capability, VoiceBridge};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::CliArgs;
use crate::console::ConsoleSynthesizer;
use crate::repl::{Command, HELP};

/// Everything a terminal command needs.
struct Host {
    assistant: TravelAssistant,
    voice: VoiceBridge,
    export_dir: PathBuf,
    app_name: String,
}

impl Host {
    /// Run one command. Returns `false` when the session should end.
    async fn handle(&self, command: Command) -> Result<bool, ChatError> {
        match command {
            Command::Send(text) => self.send(&text).await?,
            Command::Voice => {
                let tag = self.assistant.speech_tag()?;
                match self.voice.start_listening(tag).await {
                    Ok(text) => {
                        println!("🎤 {}", text);
                        self.send(&text).await?;
                    }
                    Err(e) => println!("⚠️  {}", e),
                }
            }
            Command::Speak => match self.assistant.last_answer()? {
                Some(answer) => {
                    let tag = self.assistant.speech_tag()?;
                    if let Err(e) = self.voice.speak(&answer, tag).await {
                        println!("⚠️  {}", e);
                    }
                }
                None => println!("Nothing to read yet."),
            },
            Command::Sos => match self.assistant.trigger_emergency() {
                Ok(dispatch) => {
                    print_turn(&dispatch.turn);
                    println!("{}", dispatch.confirmation);
                }
                Err(ChatError::LocationUnavailable) => {
                    println!("⚠️  {}", ChatError::LocationUnavailable)
                }
                Err(e) => return Err(e),
            },
            Command::Export => {
                match self
                    .assistant
                    .save_transcript(&self.export_dir, &self.app_name)
                {
                    Ok(path) => println!("📥 Transcript saved to {}", path.display()),
                    Err(e) => println!("⚠️  {}", e),
                }
            }
            Command::Lang(None) => {
                let current = self.assistant.language()?;
                for lang in Language::ALL {
                    let marker = if lang == current { "*" } else { " " };
                    println!(" {} {}  {}", marker, lang.code(), lang.display_name());
                }
            }
            Command::Lang(Some(code)) => match code.parse::<Language>() {
                Ok(lang) => {
                    self.assistant.set_language(lang)?;
                    println!("🌐 {} (speech: {})", lang.display_name(), lang.speech_tag());
                }
                Err(e) => println!("⚠️  {}", e),
            },
            Command::Guide => println!("{}", render_guide(&self.assistant.location()?)),
            Command::Summary => match self.assistant.summary()? {
                Some(summary) => {
                    println!("Messages: {}", summary.message_count);
                    println!(
                        "Started: {}",
                        summary
                            .started_at
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M:%S")
                    );
                }
                None => println!("No messages yet."),
            },
            Command::History => {
                for turn in self.assistant.turns()? {
                    print_turn(&turn);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
            Command::Unknown(name) => println!("Unknown command /{}. Type /help.", name),
        }
        Ok(true)
    }

    /// Send `text` and print the answer. Ctrl-C cancels the pending answer.
    async fn send(&self, text: &str) -> Result<(), ChatError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        println!("…");
        tokio::select! {
            outcome = self.assistant.handle_send(text) => match outcome {
                Ok(SendOutcome::Answered { assistant, .. }) => print_turn(&assistant),
                Ok(SendOutcome::Ignored) => {}
                Err(ChatError::MessageTooLong(max)) => {
                    println!("⚠️  Messages are limited to {} characters.", max)
                }
                Err(e) => return Err(e),
            },
            _ = tokio::signal::ctrl_c() => {
                self.assistant.cancel_pending();
                println!("(cancelled)");
            }
        }
        Ok(())
    }
}

fn print_turn(turn: &Turn) {
    println!(
        "[{}] {}:",
        turn.local_time().format("%H:%M:%S"),
        turn.role().label()
    );
    for line in turn.text().lines() {
        println!("  {}", line);
    }
}

async fn run_repl(host: &Host) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match host.handle(Command::parse(&line)).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(ChatError::SessionClosed) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Command failed");
                println!("⚠️  {}", e);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let config_file = args.resolve_config_path();
    let config = AbaConfig::load_or_default(&config_file);

    // Tracing goes to stderr so it never interleaves with the conversation.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting ABA Travel v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let events = EventBus::new();
    status::spawn_status_printer(&events);

    // Location: one-shot, in the background.
    let location = LocationCoordinator::new(events.clone());
    match args.resolve_position(&config) {
        Some(position) => {
            location.spawn_acquisition(FixedPositionProvider::new(position));
        }
        None => {
            location.spawn_acquisition(DeniedProvider);
        }
    }

    // Voice: no microphone in a terminal; answers can still be "spoken".
    let voice = if args.resolve_voice_enabled(config.voice.enabled) {
        VoiceBridge::new(
            Capability::Unsupported,
            Capability::synthesizer(ConsoleSynthesizer),
            events.clone(),
        )
    } else {
        tracing::info!("Voice disabled");
        VoiceBridge::unsupported(events.clone())
    };

    let language = args.resolve_language(config.voice.language)?;
    let session = Session::new(location, events).with_language(language);
    let host = Host {
        assistant: TravelAssistant::new(config.chat.clone(), session),
        voice,
        export_dir: args.resolve_export_dir(&config.export.directory),
        app_name: config.general.app_name.clone(),
    };

    println!("{}", render_welcome());
    println!("Type /help for commands.");

    run_repl(&host).await?;

    host.assistant.end_session()?;
    if let Some(summary) = host.assistant.summary()? {
        tracing::info!(messages = summary.message_count, "Goodbye");
    }
    Ok(())
}

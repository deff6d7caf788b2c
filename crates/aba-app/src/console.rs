//! Speech output for the terminal host.

use std::io::Write;

use aba_core::error::AbaError;
use aba_core::types::SpeechTag;
use aba_voice::SpeechSynthesizer;
use async_trait::async_trait;

/// "Speaks" by printing the text to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    fn name(&self) -> &str {
        "console"
    }

    async fn speak(&self, text: &str, tag: SpeechTag) -> Result<(), AbaError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "🔊 [{}]", tag)?;
        for line in text.lines() {
            writeln!(out, "   {}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}

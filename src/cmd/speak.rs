//! Text-to-speech command
//!
//! Handles `smart-kitchen speak`, which synthesizes speech for a piece of
//! text (a cooking step, say) and writes it as a WAV file.

use crate::ai::RecipeAssistant;
use crate::cmd::{suggest, AppContext};
use crate::error::KitchenError;
use anyhow::Result;
use console::{style, Emoji};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

static SPEAKER: Emoji = Emoji("🔊", "[AUDIO]");

/// Synthesize `text` and write the audio to `output`.
pub fn cmd_speak(text: &str, output: &Path) -> Result<()> {
    if text.trim().is_empty() {
        return Err(KitchenError::InputMissing {
            operation: "speak".to_string(),
        }
        .into());
    }

    let ctx = AppContext::load()?;
    let assistant = ctx.assistant()?;

    let spinner = suggest::progress_spinner("Synthesizing speech...");
    let result = assistant.speak(text);
    spinner.finish_and_clear();
    let audio = result?;

    let file = File::create(output).map_err(|e| KitchenError::Io {
        context: format!("creating {}", output.display()),
        source: e,
    })?;
    audio
        .write_wav(BufWriter::new(file))
        .map_err(|e| KitchenError::Io {
            context: format!("writing {}", output.display()),
            source: e,
        })?;

    println!(
        "{} Wrote {} ({:.1}s at {} Hz)",
        SPEAKER,
        style(output.display().to_string()).bold(),
        audio.duration_secs(),
        audio.sample_rate()
    );
    Ok(())
}

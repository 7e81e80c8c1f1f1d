//! One-shot ingestion command
//!
//! Handles `smart-kitchen suggest`, which identifies ingredients from a
//! photo, an audio clip, or free text and prints recipe suggestions.

use crate::ai::{self, IngestInput, RecipeAssistant};
use crate::cmd::{present, AppContext};
use crate::error::KitchenError;
use anyhow::Result;
use console::{style, Emoji};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

static MAGNIFIER: Emoji = Emoji("🔍", ">>");

/// Identify ingredients and print suggested recipes.
pub fn cmd_suggest(
    text: Option<&str>,
    image: Option<&Path>,
    audio: Option<&Path>,
    filters: &[String],
    json: bool,
) -> Result<()> {
    let input = resolve_input(text, image, audio, "suggest")?;
    let ctx = AppContext::load()?;
    let assistant = ctx.assistant()?;

    let filters = if filters.is_empty() {
        ctx.config.dietary_filters.clone()
    } else {
        filters.to_vec()
    };

    let spinner = progress_spinner("Identifying ingredients and generating recipes...");
    let result = assistant.identify_and_suggest(&input, &filters);
    spinner.finish_and_clear();
    let suggestions = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    println!(
        "{} {}",
        MAGNIFIER,
        style("Recipe suggestions").bold()
    );
    println!();
    present::print_identified_ingredients(&suggestions.identified_ingredients);
    present::print_recipe_list(&suggestions.suggested_recipes, &ctx.favorites());
    println!();
    println!(
        "Run '{}' to start cooking interactively.",
        style("smart-kitchen session").cyan()
    );
    Ok(())
}

/// Turn CLI arguments into an ingestion input, rejecting empty input.
pub(crate) fn resolve_input(
    text: Option<&str>,
    image: Option<&Path>,
    audio: Option<&Path>,
    operation: &str,
) -> Result<IngestInput> {
    if let Some(text) = text {
        if !text.trim().is_empty() {
            return Ok(IngestInput::Text(text.to_string()));
        }
    }
    if let Some(path) = image {
        return image_input(path, operation);
    }
    if let Some(path) = audio {
        return audio_input(path, operation);
    }
    Err(KitchenError::InputMissing {
        operation: operation.to_string(),
    }
    .into())
}

pub(crate) fn image_input(path: &Path, operation: &str) -> Result<IngestInput> {
    let bytes = read_media(path, operation)?;
    let mime_type = ai::image_mime_type(path).unwrap_or("image/jpeg");
    Ok(IngestInput::Image {
        bytes,
        mime_type: mime_type.to_string(),
    })
}

pub(crate) fn audio_input(path: &Path, operation: &str) -> Result<IngestInput> {
    let bytes = read_media(path, operation)?;
    let mime_type = ai::audio_mime_type(path).unwrap_or("audio/webm");
    Ok(IngestInput::Audio {
        bytes,
        mime_type: mime_type.to_string(),
    })
}

fn read_media(path: &Path, operation: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KitchenError::FileNotFound {
                path: path.to_path_buf(),
                operation: operation.to_string(),
            }
            .into()
        } else {
            KitchenError::Io {
                context: format!("reading {}", path.display()),
                source: e,
            }
            .into()
        }
    })
}

pub(crate) fn progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_input_prefers_text() {
        let input = resolve_input(Some("tomato, basil"), None, None, "suggest").unwrap();
        assert_eq!(input, IngestInput::Text("tomato, basil".to_string()));
    }

    #[test]
    fn test_resolve_input_rejects_blank_text() {
        let err = resolve_input(Some("   "), None, None, "suggest").unwrap_err();
        let kitchen = err.downcast_ref::<KitchenError>().unwrap();
        assert!(matches!(kitchen, KitchenError::InputMissing { .. }));
    }

    #[test]
    fn test_resolve_input_requires_something() {
        let err = resolve_input(None, None, None, "suggest").unwrap_err();
        let kitchen = err.downcast_ref::<KitchenError>().unwrap();
        match kitchen {
            KitchenError::InputMissing { operation } => assert_eq!(operation, "suggest"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_image_input_reads_bytes_and_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fridge.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x89, 0x50, 0x4E, 0x47]).unwrap();

        let input = image_input(&path, "suggest").unwrap();
        match input {
            IngestInput::Image { bytes, mime_type } => {
                assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
                assert_eq!(mime_type, "image/png");
            }
            other => panic!("unexpected input: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_image_extension_defaults_to_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fridge.raw");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        let input = image_input(&path, "suggest").unwrap();
        match input {
            IngestInput::Image { mime_type, .. } => assert_eq!(mime_type, "image/jpeg"),
            other => panic!("unexpected input: {:?}", other),
        }
    }

    #[test]
    fn test_missing_media_file_is_typed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.jpg");

        let err = image_input(&path, "suggest").unwrap_err();
        let kitchen = err.downcast_ref::<KitchenError>().unwrap();
        match kitchen {
            KitchenError::FileNotFound { path: found, .. } => {
                assert!(found.ends_with("nope.jpg"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_audio_input_maps_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.ogg");
        std::fs::write(&path, [7, 8]).unwrap();

        let input = audio_input(&path, "suggest").unwrap();
        match input {
            IngestInput::Audio { mime_type, .. } => assert_eq!(mime_type, "audio/ogg"),
            other => panic!("unexpected input: {:?}", other),
        }
    }
}

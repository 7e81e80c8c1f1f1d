//! Collaborator interfaces for the generative AI service
//!
//! This module provides:
//! - [`RecipeAssistant`], the trait seam the rest of the app talks to
//! - [`IngestInput`], the three accepted input kinds
//! - [`GeminiClient`], the HTTP implementation
//! - [`SpeechAudio`], decoded text-to-speech output

pub mod audio;
pub mod gemini;

pub use audio::SpeechAudio;
pub use gemini::GeminiClient;

use crate::model::{Ingredient, RecipeSuggestions, Substitution};
use anyhow::Result;
use std::path::Path;

/// One ingestion input: a photo, an audio clip, or free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestInput {
    /// Raw image bytes with their MIME type
    Image {
        /// Encoded image file contents
        bytes: Vec<u8>,
        /// MIME type such as `image/jpeg`
        mime_type: String,
    },
    /// Raw audio bytes with their MIME type
    Audio {
        /// Encoded audio clip contents
        bytes: Vec<u8>,
        /// MIME type such as `audio/webm`
        mime_type: String,
    },
    /// Free-text description of available ingredients
    Text(String),
}

impl IngestInput {
    /// Short label for logs and progress messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Audio { .. } => "audio",
            Self::Text(_) => "text",
        }
    }
}

/// Guess the MIME type of an image file from its extension.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Guess the MIME type of an audio file from its extension.
pub fn audio_mime_type(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "webm" => Some("audio/webm"),
        "mp3" => Some("audio/mp3"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "m4a" => Some("audio/mp4"),
        _ => None,
    }
}

/// Interface to the recipe-assistant collaborator.
///
/// The view layer depends on this trait, so tests can script outcomes
/// without a network.
pub trait RecipeAssistant {
    /// Identify the ingredients in `input` and propose recipes honoring
    /// the dietary `filters`.
    fn identify_and_suggest(
        &self,
        input: &IngestInput,
        filters: &[String],
    ) -> Result<RecipeSuggestions>;

    /// Suggest up to three substitutes for one ingredient of a recipe.
    fn suggest_substitutions(
        &self,
        ingredient: &Ingredient,
        recipe_name: &str,
    ) -> Result<Vec<Substitution>>;

    /// Convert `text` to raw speech audio.
    fn speak(&self, text: &str) -> Result<SpeechAudio>;
}

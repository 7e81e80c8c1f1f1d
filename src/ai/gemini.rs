//! HTTP client for the Gemini generateContent API

use crate::ai::{IngestInput, RecipeAssistant, SpeechAudio};
use crate::config::AiSettings;
use crate::error::KitchenError;
use crate::model::{Ingredient, RecipeSuggestions, Substitution};
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Maximum number of substitutions surfaced per ingredient.
pub const SUBSTITUTION_LIMIT: usize = 3;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How many characters of an error body to keep in error messages.
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: STANDARD.encode(bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }

    fn first_audio(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref().map(|data| data.data.as_str()))
    }
}

/// Blocking client for the recipe and speech models.
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    recipe_model: String,
    speech_model: String,
    voice: String,
    speech_sample_rate: u32,
}

impl GeminiClient {
    /// Build a client from settings and an explicit API key.
    pub fn new(settings: &AiSettings, api_key: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            recipe_model: settings.recipe_model.clone(),
            speech_model: settings.speech_model.clone(),
            voice: settings.voice.clone(),
            speech_sample_rate: settings.speech_sample_rate,
        })
    }

    /// Build a client reading the API key from the environment.
    pub fn from_env(settings: &AiSettings) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| KitchenError::ApiKeyMissing {
            env_var: API_KEY_ENV.to_string(),
        })?;
        Self::new(settings, api_key)
    }

    fn generate(
        &self,
        service: &str,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .map_err(|e| KitchenError::RequestFailed {
                service: service.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| String::new());
            return Err(KitchenError::RequestFailed {
                service: service.to_string(),
                detail: format!("HTTP {}: {}", status, snippet(&body)),
            }
            .into());
        }

        let parsed =
            response
                .json::<GenerateResponse>()
                .map_err(|e| KitchenError::UnparseableResponse {
                    service: service.to_string(),
                    detail: e.to_string(),
                })?;
        Ok(parsed)
    }
}

impl RecipeAssistant for GeminiClient {
    fn identify_and_suggest(
        &self,
        input: &IngestInput,
        filters: &[String],
    ) -> Result<RecipeSuggestions> {
        let instructions = ingestion_instructions(filters);
        let parts = match input {
            IngestInput::Image { bytes, mime_type } => vec![
                Part::inline(mime_type, bytes),
                Part::text(format!(
                    "Analyze this photo of the contents of a fridge. {}",
                    instructions
                )),
            ],
            IngestInput::Audio { bytes, mime_type } => vec![
                Part::inline(mime_type, bytes),
                Part::text(format!(
                    "Listen to this audio clip of a user describing the contents of \
                     their fridge. {}",
                    instructions
                )),
            ],
            IngestInput::Text(description) => vec![Part::text(format!(
                "Analyze the following list of fridge ingredients: \"{}\". {}",
                description, instructions
            ))],
        };

        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(kitchen_schema()),
                response_modalities: None,
                speech_config: None,
            }),
        };

        log::info!("Requesting recipe suggestions from {} input", input.kind());
        let response = self.generate("recipes", &self.recipe_model, &request)?;
        let text = response
            .first_text()
            .ok_or_else(|| KitchenError::UnparseableResponse {
                service: "recipes".to_string(),
                detail: "response contained no text".to_string(),
            })?;
        parse_payload("recipes", text)
    }

    fn suggest_substitutions(
        &self,
        ingredient: &Ingredient,
        recipe_name: &str,
    ) -> Result<Vec<Substitution>> {
        let prompt = substitution_prompt(ingredient, recipe_name);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(substitution_schema()),
                response_modalities: None,
                speech_config: None,
            }),
        };

        log::info!(
            "Requesting substitutions for '{}' in '{}'",
            ingredient.name,
            recipe_name
        );
        let response = self.generate("substitutions", &self.recipe_model, &request)?;
        let text = response
            .first_text()
            .ok_or_else(|| KitchenError::UnparseableResponse {
                service: "substitutions".to_string(),
                detail: "response contained no text".to_string(),
            })?;
        let mut substitutions: Vec<Substitution> = parse_payload("substitutions", text)?;
        substitutions.truncate(SUBSTITUTION_LIMIT);
        Ok(substitutions)
    }

    fn speak(&self, text: &str) -> Result<SpeechAudio> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::text(text)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.voice.clone(),
                        },
                    },
                }),
            }),
        };

        let response = self.generate("speech", &self.speech_model, &request)?;
        let data = response
            .first_audio()
            .ok_or_else(|| KitchenError::UnparseableResponse {
                service: "speech".to_string(),
                detail: "response contained no audio data".to_string(),
            })?;
        SpeechAudio::from_base64(data, self.speech_sample_rate)
    }
}

fn ingestion_instructions(filters: &[String]) -> String {
    let filter_text = if filters.is_empty() {
        String::new()
    } else {
        format!(
            "Make sure every suggested recipe is suitable for the following diets: {}. ",
            filters.join(", ")
        )
    };
    format!(
        "First, identify every ingredient in the user's input. Normalize each \
         ingredient to its base form (for example, 'tomatoes' to 'tomato'). Then, \
         based on the identified ingredients, suggest 5 diverse recipes. {}For each \
         recipe, provide a COMPLETE list of all required ingredients. Do not assume \
         a standard pantry. Respond ONLY with a valid JSON object conforming to the \
         provided schema, which expects a list of identified ingredients and a list \
         of recipe suggestions. Do not include any text before or after the JSON \
         object.",
        filter_text
    )
}

fn substitution_prompt(ingredient: &Ingredient, recipe_name: &str) -> String {
    format!(
        "You are a helpful culinary assistant. A user is cooking the recipe \
         \"{}\" and needs a substitute for \"{} of {}\". Suggest up to {} common \
         and appropriate culinary substitutions. For each substitution, provide \
         the name, the equivalent amount to use, and a brief note on how it might \
         change the flavor or texture of the dish. Respond ONLY with a valid JSON \
         array conforming to the provided schema. Do not include any text before \
         or after the JSON array.",
        recipe_name, ingredient.quantity, ingredient.name, SUBSTITUTION_LIMIT
    )
}

/// Structured-output schema for ingredient identification plus recipes.
fn kitchen_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identifiedIngredients": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Every ingredient identified in the user's input, \
                    normalized to its base form (singular, lowercase)."
            },
            "suggestedRecipes": {
                "type": "ARRAY",
                "items": recipe_schema(),
                "description": "Recipes suggested from the identified ingredients."
            }
        },
        "required": ["identifiedIngredients", "suggestedRecipes"]
    })
}

fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING", "description": "The name of the recipe." },
            "difficulty": {
                "type": "STRING",
                "enum": ["Easy", "Medium", "Hard"],
                "description": "The difficulty level."
            },
            "prepTime": {
                "type": "STRING",
                "description": "Estimated preparation time, e.g. \"30 min\"."
            },
            "calories": { "type": "NUMBER", "description": "Estimated calorie count." },
            "servings": {
                "type": "STRING",
                "description": "Estimated servings the recipe yields, e.g. \"4 servings\"."
            },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "quantity": { "type": "STRING" }
                    },
                    "required": ["name", "quantity"]
                },
                "description": "COMPLETE list of every ingredient with the quantity \
                    the recipe requires."
            },
            "steps": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Step-by-step cooking instructions."
            }
        },
        "required": [
            "recipeName",
            "difficulty",
            "prepTime",
            "calories",
            "servings",
            "ingredients",
            "steps"
        ]
    })
}

fn substitution_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the substitute ingredient."
                },
                "amount": {
                    "type": "STRING",
                    "description": "The amount of the substitute to use, e.g. \"1 cup\"."
                },
                "notes": {
                    "type": "STRING",
                    "description": "Brief notes on how this substitution may affect \
                        the final dish."
                }
            },
            "required": ["name", "amount"]
        }
    })
}

/// Parse a model text payload, trimming stray whitespace first.
fn parse_payload<T: serde::de::DeserializeOwned>(service: &str, text: &str) -> Result<T> {
    serde_json::from_str(text.trim()).map_err(|e| {
        log::warn!("Unparseable {} payload: {}", service, snippet(text));
        KitchenError::UnparseableResponse {
            service: service.to_string(),
            detail: e.to_string(),
        }
        .into()
    })
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_SNIPPET_LEN {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(BODY_SNIPPET_LEN).collect();
        format!("{}...", head)
    }
}

//! Recipe and ingredient data model
//!
//! These types are shared by the AI collaborator (response parsing), the
//! persisted documents (shopping list, favorites), and the view layer.
//! Field names serialize in camelCase so stored documents and service
//! responses bind directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient with a free-text quantity label.
///
/// `name` is the identity used for deduplication (lower-cased comparison on
/// the shopping-list add path); `quantity` is a display string, never parsed
/// into numeric units.
///
/// # Examples
///
/// ```
/// use smart_kitchen::model::Ingredient;
///
/// let tomato = Ingredient::new("tomato", "3");
/// assert_eq!(tomato.name, "tomato");
/// assert_eq!(tomato.quantity, "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Free-text quantity such as "3" or "1 tsp"
    pub quantity: String,
}

impl Ingredient {
    /// Create an ingredient from name and quantity labels.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Recipe difficulty as reported by the AI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Suitable for beginners
    Easy,
    /// Some technique required
    Medium,
    /// Involved preparation
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// A suggested recipe.
///
/// Identity is the `recipe_name` field, compared exactly (case-sensitive).
/// Recipes never carry a synthetic id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique name identifying the recipe
    pub recipe_name: String,
    /// Difficulty rating
    pub difficulty: Difficulty,
    /// Preparation time label such as "30 min"
    pub prep_time: String,
    /// Estimated calorie count per serving
    pub calories: f64,
    /// Servings label such as "4 servings"
    pub servings: String,
    /// Ingredients in presentation order
    pub ingredients: Vec<Ingredient>,
    /// Preparation steps in order
    pub steps: Vec<String>,
}

/// One substitution proposal for an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Substitute ingredient name
    pub name: String,
    /// Amount to use in place of the original
    pub amount: String,
    /// Optional preparation note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of one ingestion request: what the service recognized in the
/// input, and the recipes it proposes from those ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestions {
    /// Ingredient names the service identified in the input
    pub identified_ingredients: Vec<String>,
    /// Suggested recipes, typically five
    pub suggested_recipes: Vec<Recipe>,
}

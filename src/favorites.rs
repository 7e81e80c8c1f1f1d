//! Favorites document
//!
//! A set of recipes keyed by name, kept in insertion order. Membership only;
//! there is no merge logic here. Every toggle re-serializes the document
//! through the storage port, same contract as the shopping list.

use crate::model::Recipe;
use crate::store::{KeyValueStore, StorageKey};
use log::warn;

/// Persistent favorite-recipe set backed by a storage port.
pub struct Favorites<S: KeyValueStore> {
    recipes: Vec<Recipe>,
    store: S,
    key: StorageKey,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Storage purpose for favorites documents.
    pub const PURPOSE: &'static str = "favorites";

    /// Load the favorites for `namespace` from the store.
    ///
    /// Missing, unreadable, or unparseable documents degrade to an empty set;
    /// failures are logged, never surfaced.
    pub fn load(store: S, namespace: &str) -> Self {
        let key = StorageKey::new(Self::PURPOSE, namespace);
        let recipes = match store.get(&key) {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(recipes) => recipes,
                Err(e) => {
                    warn!("Failed to parse favorites document {}: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites document {}: {}", key, e);
                Vec::new()
            }
        };

        Self {
            recipes,
            store,
            key,
        }
    }

    /// Add `recipe` to the set, or remove it if a recipe with the same name
    /// is already present.
    pub fn toggle(&mut self, recipe: Recipe) {
        if self.is_favorite(&recipe.recipe_name) {
            self.recipes.retain(|r| r.recipe_name != recipe.recipe_name);
        } else {
            self.recipes.push(recipe);
        }
        self.persist();
    }

    /// Membership test by exact recipe name.
    pub fn is_favorite(&self, recipe_name: &str) -> bool {
        self.recipes.iter().any(|r| r.recipe_name == recipe_name)
    }

    /// Favorite recipes in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// True when the set is empty.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.recipes) {
            Ok(contents) => {
                if let Err(e) = self.store.set(&self.key, &contents) {
                    warn!("Failed to write favorites document {}: {}", self.key, e);
                }
            }
            Err(e) => warn!("Failed to serialize favorites document {}: {}", self.key, e),
        }
    }
}

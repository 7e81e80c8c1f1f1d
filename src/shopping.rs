//! Shopping-list aggregation and persistence
//!
//! The shopping list groups ingredients by the recipe that contributed them.
//! Adding a recipe's ingredients merges into any existing entry for that
//! recipe, deduplicating by lower-cased ingredient name; removal matches the
//! exact name. Every mutation re-serializes the whole document through the
//! storage port, so in-memory and persisted state never diverge.

use crate::model::Ingredient;
use crate::store::{KeyValueStore, StorageKey};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One per-recipe grouping of ingredients within the shopping list.
///
/// Invariant: `items` is never empty; an entry is dropped entirely when its
/// last item is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Recipe that contributed these items
    pub recipe_name: String,
    /// Ingredients still to buy, unique by lower-cased name within the entry
    pub items: Vec<Ingredient>,
    /// Servings label captured when the entry was first created
    pub servings: String,
}

/// Persistent shopping list backed by a storage port.
///
/// Entries keep insertion order for display. No two entries share a
/// `recipe_name`.
///
/// # Examples
///
/// ```
/// use smart_kitchen::model::Ingredient;
/// use smart_kitchen::shopping::ShoppingList;
/// use smart_kitchen::store::MemoryStore;
///
/// let mut list = ShoppingList::load(MemoryStore::new(), "local");
/// list.add(
///     "Tomato Soup",
///     vec![Ingredient::new("tomato", "3"), Ingredient::new("salt", "1 tsp")],
///     "4 servings",
/// );
///
/// assert_eq!(list.entries().len(), 1);
/// assert_eq!(list.total_item_count(), 2);
/// ```
pub struct ShoppingList<S: KeyValueStore> {
    entries: Vec<ShoppingListEntry>,
    store: S,
    key: StorageKey,
}

impl<S: KeyValueStore> ShoppingList<S> {
    /// Storage purpose for shopping-list documents.
    pub const PURPOSE: &'static str = "shopping-list";

    /// Load the shopping list for `namespace` from the store.
    ///
    /// A missing document yields an empty list. Read and parse failures are
    /// logged and degrade to an empty list as well, never surfaced.
    pub fn load(store: S, namespace: &str) -> Self {
        let key = StorageKey::new(Self::PURPOSE, namespace);
        let entries = match store.get(&key) {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to parse shopping list document {}: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read shopping list document {}: {}", key, e);
                Vec::new()
            }
        };

        Self {
            entries,
            store,
            key,
        }
    }

    /// Merge `new_items` into the entry for `recipe_name`, creating the
    /// entry if absent.
    ///
    /// For an existing entry only items whose lower-cased name is not already
    /// present are appended, in their given order, after the existing items.
    /// The stored `servings` label is kept; the argument only applies to a
    /// newly created entry (first write wins).
    pub fn add(&mut self, recipe_name: &str, new_items: Vec<Ingredient>, servings: &str) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.recipe_name == recipe_name)
        {
            Some(entry) => {
                let present: HashSet<String> = entry
                    .items
                    .iter()
                    .map(|item| item.name.to_lowercase())
                    .collect();
                entry.items.extend(
                    new_items
                        .into_iter()
                        .filter(|item| !present.contains(&item.name.to_lowercase())),
                );
            }
            None => self.entries.push(ShoppingListEntry {
                recipe_name: recipe_name.to_string(),
                items: new_items,
                servings: servings.to_string(),
            }),
        }
        self.persist();
    }

    /// Remove every item named exactly `item_name` from the entry for
    /// `recipe_name`.
    ///
    /// The match is case-sensitive, unlike the add path's dedup. When the
    /// entry's last item goes, the entry goes with it.
    pub fn remove_item(&mut self, recipe_name: &str, item_name: &str) {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.recipe_name == recipe_name)
        {
            let entry = &mut self.entries[pos];
            entry.items.retain(|item| item.name != item_name);
            if entry.items.is_empty() {
                self.entries.remove(pos);
            }
        }
        self.persist();
    }

    /// Drop the entry for `recipe_name` entirely, regardless of remaining
    /// items.
    pub fn remove_recipe(&mut self, recipe_name: &str) {
        self.entries.retain(|e| e.recipe_name != recipe_name);
        self.persist();
    }

    /// Empty the list and delete the persisted document.
    ///
    /// The storage key is removed rather than overwritten with an empty
    /// array, so the next load starts from "no document".
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(&self.key) {
            warn!("Failed to delete shopping list document {}: {}", self.key, e);
        }
    }

    /// Sum of item counts across all entries, recomputed from current state.
    pub fn total_item_count(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).sum()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ShoppingListEntry] {
        &self.entries
    }

    /// True when no entry remains.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(contents) => {
                if let Err(e) = self.store.set(&self.key, &contents) {
                    warn!(
                        "Failed to write shopping list document {}: {}",
                        self.key, e
                    );
                }
            }
            Err(e) => warn!(
                "Failed to serialize shopping list document {}: {}",
                self.key, e
            ),
        }
    }
}

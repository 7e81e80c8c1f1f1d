#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! smart-kitchen library
//!
//! This library provides the core functionality of the smart-kitchen
//! assistant: the recipe data model, the shopping-list aggregator, the
//! favorites set, key-value document storage, the session state machine,
//! and clients for the AI and auth collaborators. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Building a shopping list against the in-memory store:
//!
//! ```
//! use smart_kitchen::model::Ingredient;
//! use smart_kitchen::shopping::ShoppingList;
//! use smart_kitchen::store::MemoryStore;
//!
//! let mut list = ShoppingList::load(MemoryStore::new(), "local");
//! list.add(
//!     "Tomato Soup",
//!     vec![Ingredient::new("Tomato", "4"), Ingredient::new("Basil", "1 bunch")],
//!     "4 servings",
//! );
//!
//! // Merging the same recipe deduplicates by lower-cased item name.
//! list.add("Tomato Soup", vec![Ingredient::new("tomato", "2")], "2 servings");
//! assert_eq!(list.total_item_count(), 2);
//!
//! // The first write's servings stick.
//! assert_eq!(list.entries()[0].servings, "4 servings");
//! ```
//!
//! # Advanced Example: Driving the Session Machine
//!
//! The session state machine accepts collaborator outcomes without any
//! network in sight:
//!
//! ```
//! use smart_kitchen::model::RecipeSuggestions;
//! use smart_kitchen::session::{Session, View};
//! use smart_kitchen::store::MemoryStore;
//!
//! let mut session = Session::new(MemoryStore::new(), "local");
//! assert_eq!(session.view(), View::Upload);
//!
//! session.begin_ingestion();
//! assert_eq!(session.view(), View::Loading);
//!
//! session.finish_ingestion(Ok(RecipeSuggestions {
//!     identified_ingredients: vec!["tomato".to_string()],
//!     suggested_recipes: Vec::new(),
//! }));
//! assert_eq!(session.view(), View::Recipes);
//!
//! // A failed request carries its message back to the upload screen.
//! session.begin_ingestion();
//! session.finish_ingestion(Err("service unavailable".to_string()));
//! assert_eq!(session.view(), View::Upload);
//! assert_eq!(session.last_error(), Some("service unavailable"));
//! ```
//!
//! # Advanced Example: Namespaced Persistence
//!
//! Documents live under `(purpose, namespace)` keys, so accounts keep
//! separate lists:
//!
//! ```
//! use smart_kitchen::favorites::Favorites;
//! use smart_kitchen::store::{FileStore, StorageKey};
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! let store = FileStore::new(dir.path());
//!
//! let local = Favorites::load(store.clone(), "local");
//! let account = Favorites::load(store.clone(), "user-123");
//! assert!(local.is_empty() && account.is_empty());
//!
//! let key = StorageKey::new(Favorites::<FileStore>::PURPOSE, "user-123");
//! assert_eq!(key.as_str(), "favorites.user-123");
//! ```

/// Clients for the generative AI collaborators
pub mod ai;
/// Account sign-in against the hosted auth service
pub mod auth;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading and defaults
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Favorite-recipe document
pub mod favorites;
/// Shared formatting utilities
pub mod fmt;
/// Recipe and ingredient data model
pub mod model;
/// View state machine for the interactive session
pub mod session;
/// Shopping-list aggregation and persistence
pub mod shopping;
/// Key-value document storage port and backends
pub mod store;

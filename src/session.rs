//! View-state machine for the interactive session
//!
//! [`Session`] owns everything a running assistant shows: the current view,
//! the lifecycle of the in-flight collaborator request, the recipe selection,
//! and the two persisted documents. Collaborator calls happen outside; their
//! outcomes are fed back through [`Session::finish_ingestion`] and
//! [`Session::finish_substitution`]. Errors live inside [`RequestState`], so
//! a pending request and a stale error cannot coexist.

use crate::favorites::Favorites;
use crate::model::{Recipe, RecipeSuggestions, Substitution};
use crate::shopping::ShoppingList;
use crate::store::KeyValueStore;

/// Screens the assistant can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Waiting for ingredient input
    Upload,
    /// Ingestion request in flight
    Loading,
    /// Suggested recipes listed
    Recipes,
    /// One recipe opened for cooking
    Cooking,
    /// Shopping list
    Shopping,
    /// Favorite recipes
    Favorites,
}

/// Lifecycle of one collaborator request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// No request made yet, or state was reset
    Idle,
    /// Request in flight
    Pending,
    /// Request finished with a payload
    Success(T),
    /// Request failed with a user-visible message
    Failure(String),
}

impl<T> RequestState<T> {
    /// True while a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The success payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// The assistant's view controller.
///
/// Initial view is [`View::Upload`]. No state is terminal; the machine runs
/// for the lifetime of the session. Navigation resets transient state only,
/// never the persisted documents.
///
/// # Examples
///
/// ```
/// use smart_kitchen::session::{Session, View};
/// use smart_kitchen::store::MemoryStore;
///
/// let mut session = Session::new(MemoryStore::new(), "local");
/// assert_eq!(session.view(), View::Upload);
///
/// session.begin_ingestion();
/// assert_eq!(session.view(), View::Loading);
///
/// session.finish_ingestion(Err("service unreachable".to_string()));
/// assert_eq!(session.view(), View::Upload);
/// assert_eq!(session.last_error(), Some("service unreachable"));
/// ```
pub struct Session<S: KeyValueStore> {
    view: View,
    ingestion: RequestState<RecipeSuggestions>,
    substitution: RequestState<Vec<Substitution>>,
    selected: Option<Recipe>,
    filters: Vec<String>,
    shopping: ShoppingList<S>,
    favorites: Favorites<S>,
}

impl<S: KeyValueStore + Clone> Session<S> {
    /// Start a session on `store`, loading the documents for `namespace`.
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            view: View::Upload,
            ingestion: RequestState::Idle,
            substitution: RequestState::Idle,
            selected: None,
            filters: Vec::new(),
            shopping: ShoppingList::load(store.clone(), namespace),
            favorites: Favorites::load(store, namespace),
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// The current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// True while an ingestion request is in flight.
    pub fn is_loading(&self) -> bool {
        self.ingestion.is_pending()
    }

    /// The message from the last failed ingestion, cleared by the next
    /// submission or by navigating home.
    pub fn last_error(&self) -> Option<&str> {
        self.ingestion.failure()
    }

    /// Mark an ingestion request as in flight and show the loading screen.
    ///
    /// Any previous error or result is dropped.
    pub fn begin_ingestion(&mut self) {
        self.ingestion = RequestState::Pending;
        self.substitution = RequestState::Idle;
        self.view = View::Loading;
    }

    /// Apply the ingestion outcome.
    ///
    /// Success lands on the recipe list; failure returns to the upload
    /// screen with the message carried in the request state.
    pub fn finish_ingestion(&mut self, outcome: Result<RecipeSuggestions, String>) {
        match outcome {
            Ok(suggestions) => {
                self.ingestion = RequestState::Success(suggestions);
                self.view = View::Recipes;
            }
            Err(message) => {
                self.ingestion = RequestState::Failure(message);
                self.view = View::Upload;
            }
        }
    }

    /// Recipes from the last successful ingestion.
    pub fn recipes(&self) -> &[Recipe] {
        self.ingestion
            .success()
            .map(|s| s.suggested_recipes.as_slice())
            .unwrap_or_default()
    }

    /// Ingredient names identified by the last successful ingestion.
    pub fn identified_ingredients(&self) -> &[String] {
        self.ingestion
            .success()
            .map(|s| s.identified_ingredients.as_slice())
            .unwrap_or_default()
    }

    /// Open the recipe at `index` for cooking.
    ///
    /// Selection is only available from the recipe list and the favorites
    /// view; the index refers to whichever of those is showing.
    pub fn select_recipe(&mut self, index: usize) -> Option<&Recipe> {
        let recipe = match self.view {
            View::Recipes => self.recipes().get(index).cloned(),
            View::Favorites => self.favorites.recipes().get(index).cloned(),
            _ => None,
        }?;

        self.selected = Some(recipe);
        self.substitution = RequestState::Idle;
        self.view = View::Cooking;
        self.selected.as_ref()
    }

    /// The recipe currently open for cooking, if any.
    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    /// Push every ingredient of the open recipe onto the shopping list and
    /// switch to the shopping view.
    ///
    /// Returns false when no recipe is open.
    pub fn add_selected_to_list(&mut self) -> bool {
        let Some(recipe) = self.selected.clone() else {
            return false;
        };
        self.shopping.add(
            &recipe.recipe_name,
            recipe.ingredients.clone(),
            &recipe.servings,
        );
        self.substitution = RequestState::Idle;
        self.view = View::Shopping;
        true
    }

    /// Toggle the open recipe in the favorites set.
    ///
    /// Returns the new membership state, or `None` when no recipe is open.
    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let recipe = self.selected.clone()?;
        let name = recipe.recipe_name.clone();
        self.favorites.toggle(recipe);
        Some(self.favorites.is_favorite(&name))
    }

    /// Toggle the recipe at `index` of the current list view in the
    /// favorites set.
    ///
    /// Returns the new membership state, or `None` when the view has no
    /// list or the index is out of range.
    pub fn toggle_favorite_at(&mut self, index: usize) -> Option<bool> {
        let recipe = match self.view {
            View::Recipes => self.recipes().get(index).cloned(),
            View::Favorites => self.favorites.recipes().get(index).cloned(),
            _ => None,
        }?;
        let name = recipe.recipe_name.clone();
        self.favorites.toggle(recipe);
        Some(self.favorites.is_favorite(&name))
    }

    /// Mark a substitution request as in flight.
    ///
    /// Substitutions keep their own request state: a failure here shows
    /// inline in the cooking view and never disturbs the main error or the
    /// current view.
    pub fn begin_substitution(&mut self) {
        self.substitution = RequestState::Pending;
    }

    /// Apply the substitution outcome.
    pub fn finish_substitution(&mut self, outcome: Result<Vec<Substitution>, String>) {
        self.substitution = match outcome {
            Ok(substitutions) => RequestState::Success(substitutions),
            Err(message) => RequestState::Failure(message),
        };
    }

    /// State of the substitution panel.
    pub fn substitution(&self) -> &RequestState<Vec<Substitution>> {
        &self.substitution
    }

    /// Show the shopping list. Available from any state.
    pub fn show_shopping(&mut self) {
        self.substitution = RequestState::Idle;
        self.view = View::Shopping;
    }

    /// Show the favorites. Available from any state.
    pub fn show_favorites(&mut self) {
        self.substitution = RequestState::Idle;
        self.view = View::Favorites;
    }

    /// Return to the upload screen, clearing the recipe selection, the
    /// suggestions, and any error.
    ///
    /// The persisted shopping list and favorites are untouched.
    pub fn go_home(&mut self) {
        self.view = View::Upload;
        self.selected = None;
        self.ingestion = RequestState::Idle;
        self.substitution = RequestState::Idle;
    }

    /// Dietary filter labels applied to every ingestion request.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Replace the active dietary filters.
    pub fn set_filters(&mut self, filters: Vec<String>) {
        self.filters = filters;
    }

    /// The shopping list document.
    pub fn shopping(&self) -> &ShoppingList<S> {
        &self.shopping
    }

    /// Mutable access to the shopping list document.
    pub fn shopping_mut(&mut self) -> &mut ShoppingList<S> {
        &mut self.shopping
    }

    /// The favorites document.
    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    /// Mutable access to the favorites document.
    pub fn favorites_mut(&mut self) -> &mut Favorites<S> {
        &mut self.favorites
    }
}

//! Interactive session command
//!
//! Runs the view state machine as a terminal loop: one command per line,
//! rendering the active view after each action. Because the loop handles
//! a single command at a time, only one collaborator request is ever in
//! flight.

use crate::ai::{gemini::API_KEY_ENV, IngestInput, RecipeAssistant};
use crate::auth;
use crate::cmd::{present, suggest, AppContext};
use crate::error::{ErrorFormatter, KitchenError};
use crate::fmt::{BULB, CART, CHECKMARK, CROSSMARK, INFO, PAN, STAR, WARNING};
use crate::model::Substitution;
use crate::session::{RequestState, Session, View};
use crate::store::KeyValueStore;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Run the interactive kitchen session.
pub fn cmd_session() -> Result<()> {
    let ctx = AppContext::load()?;
    let mut session = Session::new(ctx.store.clone(), &ctx.namespace);
    session.set_filters(ctx.config.dietary_filters.clone());

    let assistant = match ctx.assistant() {
        Ok(client) => Some(client),
        Err(e) => {
            log::warn!("AI collaborator unavailable: {}", e);
            None
        }
    };

    print_welcome(&ctx);
    if assistant.is_none() {
        println!(
            "{}  {} is not set, so recipe suggestions are disabled.",
            INFO,
            style(API_KEY_ENV).bold()
        );
        println!("   Shopping list and favorites still work.");
        println!();
    }

    let stdin = io::stdin();
    run_loop(
        &mut session,
        assistant.as_ref().map(|client| client as &dyn RecipeAssistant),
        stdin.lock(),
    )
}

fn print_welcome(ctx: &AppContext) {
    println!("{} {}", PAN, style("smart-kitchen session").bold());
    if let Some(account) = auth::stored_session(&ctx.store) {
        let who = account.user.email.clone().unwrap_or(account.user.id);
        println!("Signed in as {}", style(who).cyan());
    }
    println!("Type 'help' for commands, 'quit' to leave.");
    println!();
}

fn run_loop<S: KeyValueStore>(
    session: &mut Session<S>,
    assistant: Option<&dyn RecipeAssistant>,
    input: impl BufRead,
) -> Result<()> {
    render(session);
    let mut lines = input.lines();
    loop {
        print!("{} ", style(">").dim());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (command, rest) = split_command(trimmed);
        if !dispatch(session, assistant, &command, rest) {
            break;
        }
    }
    println!("Happy cooking!");
    Ok(())
}

fn split_command(line: &str) -> (String, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

/// Handle one command line. Returns false when the loop should end.
fn dispatch<S: KeyValueStore>(
    session: &mut Session<S>,
    assistant: Option<&dyn RecipeAssistant>,
    command: &str,
    rest: &str,
) -> bool {
    match command {
        "quit" | "exit" => return false,
        "help" => print_help(),
        "home" => {
            session.go_home();
            render(session);
        }
        "text" => {
            if rest.is_empty() {
                print_inline_error(
                    &KitchenError::InputMissing {
                        operation: "text".to_string(),
                    }
                    .into(),
                );
            } else {
                ingest(session, assistant, IngestInput::Text(rest.to_string()));
                render(session);
            }
        }
        "image" | "audio" => {
            if rest.is_empty() {
                println!("Usage: {} <path>", command);
            } else {
                let path = Path::new(rest);
                let loaded = if command == "image" {
                    suggest::image_input(path, command)
                } else {
                    suggest::audio_input(path, command)
                };
                match loaded {
                    Ok(media) => {
                        ingest(session, assistant, media);
                        render(session);
                    }
                    Err(e) => print_inline_error(&e),
                }
            }
        }
        "filters" => set_filters(session, rest),
        "cook" => {
            let Some(number) = parse_index(rest) else {
                println!("Usage: cook <number>");
                return true;
            };
            if session.select_recipe(number - 1).is_none() {
                println!("No recipe numbered {}.", number);
            } else {
                render(session);
            }
        }
        "sub" => {
            let Some(number) = parse_index(rest) else {
                println!("Usage: sub <ingredient number>");
                return true;
            };
            substitute(session, assistant, number);
            render(session);
        }
        "add" => {
            if session.add_selected_to_list() {
                println!("{} Ingredients added to your shopping list.", CART);
                render(session);
            } else {
                println!("Select a recipe first (cook <number>).");
            }
        }
        "fav" => toggle_favorite(session, rest),
        "shopping" => {
            session.show_shopping();
            render(session);
        }
        "favorites" => {
            session.show_favorites();
            render(session);
        }
        "remove" => {
            remove_from_shopping(session, rest);
            render(session);
        }
        "clear" => {
            if session.view() == View::Shopping {
                session.shopping_mut().clear();
                println!("Shopping list cleared.");
                render(session);
            } else {
                println!("Open the shopping list first (shopping).");
            }
        }
        _ => println!("Unknown command '{}'. Type 'help' for commands.", command),
    }
    true
}

fn ingest<S: KeyValueStore>(
    session: &mut Session<S>,
    assistant: Option<&dyn RecipeAssistant>,
    input: IngestInput,
) {
    let Some(assistant) = assistant else {
        println!(
            "Recipe suggestions need {}. Set it and restart the session.",
            style(API_KEY_ENV).bold()
        );
        return;
    };
    session.begin_ingestion();
    let spinner = suggest::progress_spinner("Identifying ingredients and generating recipes...");
    let result = assistant.identify_and_suggest(&input, session.filters());
    spinner.finish_and_clear();
    session.finish_ingestion(result.map_err(|e| e.to_string()));
}

fn substitute<S: KeyValueStore>(
    session: &mut Session<S>,
    assistant: Option<&dyn RecipeAssistant>,
    number: usize,
) {
    let Some(assistant) = assistant else {
        println!(
            "Substitutions need {}. Set it and restart the session.",
            style(API_KEY_ENV).bold()
        );
        return;
    };
    let Some(recipe) = session.selected() else {
        println!("Select a recipe first (cook <number>).");
        return;
    };
    let Some(ingredient) = number
        .checked_sub(1)
        .and_then(|index| recipe.ingredients.get(index))
        .cloned()
    else {
        println!("No ingredient numbered {}.", number);
        return;
    };
    let recipe_name = recipe.recipe_name.clone();

    session.begin_substitution();
    let spinner =
        suggest::progress_spinner(&format!("Finding substitutes for {}...", ingredient.name));
    let result = assistant.suggest_substitutions(&ingredient, &recipe_name);
    spinner.finish_and_clear();
    session.finish_substitution(result.map_err(|e| e.to_string()));
}

fn set_filters<S: KeyValueStore>(session: &mut Session<S>, rest: &str) {
    if rest.is_empty() {
        if session.filters().is_empty() {
            println!("No dietary filters active.");
        } else {
            println!("Active filters: {}", style(session.filters().join(", ")).cyan());
        }
        println!("Set with: filters vegetarian, gluten-free (or 'filters none').");
        return;
    }
    if rest.eq_ignore_ascii_case("none") {
        session.set_filters(Vec::new());
        println!("Filters cleared.");
        return;
    }
    let filters: Vec<String> = rest
        .split(',')
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();
    println!("Active filters: {}", style(filters.join(", ")).cyan());
    session.set_filters(filters);
}

fn toggle_favorite<S: KeyValueStore>(session: &mut Session<S>, rest: &str) {
    let toggled = if rest.is_empty() {
        session.toggle_selected_favorite()
    } else {
        match parse_index(rest) {
            Some(number) => session.toggle_favorite_at(number - 1),
            None => {
                println!("Usage: fav [number]");
                return;
            }
        }
    };
    match toggled {
        Some(true) => println!("{} Saved to favorites.", STAR),
        Some(false) => println!("Removed from favorites."),
        None => println!("Nothing to favorite here. Pick a recipe (cook <number>) or use fav <number>."),
    }
}

fn remove_from_shopping<S: KeyValueStore>(session: &mut Session<S>, rest: &str) {
    if session.view() != View::Shopping {
        println!("Open the shopping list first (shopping).");
        return;
    }
    let mut parts = rest.split_whitespace();
    let entry_number = parts.next().and_then(|token| token.parse::<usize>().ok());
    let item_number = parts.next().and_then(|token| token.parse::<usize>().ok());
    let Some(entry_number) = entry_number else {
        println!("Usage: remove <entry> [item]");
        return;
    };

    let Some(entry) = entry_number
        .checked_sub(1)
        .and_then(|index| session.shopping().entries().get(index))
    else {
        println!("No entry numbered {}.", entry_number);
        return;
    };
    let recipe_name = entry.recipe_name.clone();

    match item_number {
        Some(item_number) => {
            let Some(item) = item_number
                .checked_sub(1)
                .and_then(|index| entry.items.get(index))
            else {
                println!("No item numbered {} under {}.", item_number, recipe_name);
                return;
            };
            let item_name = item.name.clone();
            session.shopping_mut().remove_item(&recipe_name, &item_name);
            println!("Removed {} from {}.", item_name, recipe_name);
        }
        None => {
            session.shopping_mut().remove_recipe(&recipe_name);
            println!("Removed {} from the list.", recipe_name);
        }
    }
}

fn parse_index(rest: &str) -> Option<usize> {
    let number = rest.parse::<usize>().ok()?;
    if number == 0 {
        return None;
    }
    Some(number)
}

fn render<S: KeyValueStore>(session: &Session<S>) {
    println!();
    if let Some(message) = session.last_error() {
        println!("{} {}", CROSSMARK, style(message).red());
        println!();
    }
    match session.view() {
        View::Upload => {
            println!("{} {}", PAN, style("What's in your kitchen?").bold());
            println!("Describe ingredients with 'text ...', or point at a file with");
            println!("'image <path>' or 'audio <path>'.");
            if !session.filters().is_empty() {
                println!(
                    "Active filters: {}",
                    style(session.filters().join(", ")).cyan()
                );
            }
        }
        View::Loading => println!("Working..."),
        View::Recipes => {
            present::print_identified_ingredients(session.identified_ingredients());
            present::print_recipe_list(session.recipes(), session.favorites());
            println!();
            println!("Commands: cook <n>, fav <n>, shopping, favorites, home");
        }
        View::Cooking => {
            if let Some(recipe) = session.selected() {
                present::print_recipe_card(recipe);
                render_substitution(session.substitution());
                println!();
                println!("Commands: sub <ingredient#>, add, fav, home");
            }
        }
        View::Shopping => {
            println!("{} {}", CART, style("Shopping list").bold());
            println!();
            present::print_shopping_list(session.shopping());
            println!();
            println!("Commands: remove <entry> [item], clear, home");
        }
        View::Favorites => {
            println!("{} {}", CHECKMARK, style("Favorite recipes").bold());
            println!();
            present::print_favorites(session.favorites());
            println!();
            println!("Commands: cook <n>, fav <n>, home");
        }
    }
}

fn render_substitution(state: &RequestState<Vec<Substitution>>) {
    match state {
        RequestState::Success(substitutions) => {
            println!();
            println!("{} {}", BULB, style("Substitutions:").bold());
            present::print_substitutions(substitutions);
        }
        RequestState::Failure(message) => {
            println!();
            println!("{} {}", WARNING, style(message).yellow());
        }
        RequestState::Idle | RequestState::Pending => {}
    }
}

fn print_inline_error(error: &anyhow::Error) {
    print!("{}", ErrorFormatter::format(error));
}

fn print_help() {
    println!("Commands:");
    println!("  text <description>    Suggest recipes from a text description");
    println!("  image <path>          Suggest recipes from a photo");
    println!("  audio <path>          Suggest recipes from an audio clip");
    println!("  filters [labels]      Show or set dietary filters (comma-separated)");
    println!("  cook <n>              Open recipe n");
    println!("  sub <n>               Substitutes for ingredient n of the open recipe");
    println!("  add                   Add the open recipe's ingredients to the list");
    println!("  fav [n]               Toggle favorite (open recipe, or recipe n)");
    println!("  shopping              Show the shopping list");
    println!("  favorites             Show favorite recipes");
    println!("  remove <e> [i]        Remove entry e (or its item i) from the list");
    println!("  clear                 Clear the shopping list");
    println!("  home                  Back to the start screen");
    println!("  quit                  Leave the session");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Ingredient, Recipe, RecipeSuggestions};
    use crate::store::MemoryStore;
    use std::io::Cursor;

    struct ScriptedAssistant {
        suggestions: RecipeSuggestions,
    }

    impl RecipeAssistant for ScriptedAssistant {
        fn identify_and_suggest(
            &self,
            _input: &IngestInput,
            _filters: &[String],
        ) -> Result<RecipeSuggestions> {
            Ok(self.suggestions.clone())
        }

        fn suggest_substitutions(
            &self,
            ingredient: &Ingredient,
            _recipe_name: &str,
        ) -> Result<Vec<Substitution>> {
            Ok(vec![Substitution {
                name: format!("{} substitute", ingredient.name),
                amount: ingredient.quantity.clone(),
                notes: None,
            }])
        }

        fn speak(&self, _text: &str) -> Result<crate::ai::SpeechAudio> {
            anyhow::bail!("speech is not scripted")
        }
    }

    fn sample_recipe(name: &str) -> Recipe {
        Recipe {
            recipe_name: name.to_string(),
            difficulty: Difficulty::Easy,
            prep_time: "20 min".to_string(),
            calories: 320.0,
            servings: "2 servings".to_string(),
            ingredients: vec![
                Ingredient::new("tomato", "3"),
                Ingredient::new("basil", "1 bunch"),
            ],
            steps: vec!["Chop".to_string(), "Simmer".to_string()],
        }
    }

    fn scripted() -> ScriptedAssistant {
        ScriptedAssistant {
            suggestions: RecipeSuggestions {
                identified_ingredients: vec!["tomato".to_string(), "basil".to_string()],
                suggested_recipes: vec![sample_recipe("Tomato Soup"), sample_recipe("Bruschetta")],
            },
        }
    }

    fn new_session() -> Session<MemoryStore> {
        Session::new(MemoryStore::new(), "local")
    }

    #[test]
    fn test_loop_ends_on_quit() {
        let mut session = new_session();
        run_loop(&mut session, None, Cursor::new("quit\n")).unwrap();
        assert_eq!(session.view(), View::Upload);
    }

    #[test]
    fn test_loop_ends_on_eof() {
        let mut session = new_session();
        run_loop(&mut session, None, Cursor::new("shopping\n")).unwrap();
        assert_eq!(session.view(), View::Shopping);
    }

    #[test]
    fn test_text_without_assistant_stays_on_upload() {
        let mut session = new_session();
        run_loop(&mut session, None, Cursor::new("text tomatoes\nquit\n")).unwrap();
        assert_eq!(session.view(), View::Upload);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_full_cook_and_add_flow() {
        let assistant = scripted();
        let mut session = new_session();
        run_loop(
            &mut session,
            Some(&assistant),
            Cursor::new("text tomatoes and basil\ncook 1\nadd\nquit\n"),
        )
        .unwrap();

        assert_eq!(session.view(), View::Shopping);
        assert_eq!(session.shopping().total_item_count(), 2);
        assert_eq!(session.shopping().entries()[0].recipe_name, "Tomato Soup");
    }

    #[test]
    fn test_substitution_flow_records_success() {
        let assistant = scripted();
        let mut session = new_session();
        run_loop(
            &mut session,
            Some(&assistant),
            Cursor::new("text tomatoes\ncook 2\nsub 1\nquit\n"),
        )
        .unwrap();

        assert_eq!(session.view(), View::Cooking);
        let substitutions = session.substitution().success().unwrap();
        assert_eq!(substitutions[0].name, "tomato substitute");
    }

    #[test]
    fn test_fav_by_number_from_recipe_list() {
        let assistant = scripted();
        let mut session = new_session();
        run_loop(
            &mut session,
            Some(&assistant),
            Cursor::new("text tomatoes\nfav 2\nquit\n"),
        )
        .unwrap();

        assert!(session.favorites().is_favorite("Bruschetta"));
        assert!(!session.favorites().is_favorite("Tomato Soup"));
    }

    #[test]
    fn test_remove_item_by_index() {
        let mut session = new_session();
        session.shopping_mut().add(
            "Tomato Soup",
            vec![Ingredient::new("Tomato", "3"), Ingredient::new("Basil", "1")],
            "4 servings",
        );

        run_loop(&mut session, None, Cursor::new("shopping\nremove 1 1\nquit\n")).unwrap();

        assert_eq!(session.shopping().total_item_count(), 1);
        assert_eq!(session.shopping().entries()[0].items[0].name, "Basil");
    }

    #[test]
    fn test_remove_entry_by_index() {
        let mut session = new_session();
        session
            .shopping_mut()
            .add("Tomato Soup", vec![Ingredient::new("Tomato", "3")], "4");
        session
            .shopping_mut()
            .add("Bruschetta", vec![Ingredient::new("Bread", "1")], "2");

        run_loop(&mut session, None, Cursor::new("shopping\nremove 1\nquit\n")).unwrap();

        assert_eq!(session.shopping().entries().len(), 1);
        assert_eq!(session.shopping().entries()[0].recipe_name, "Bruschetta");
    }

    #[test]
    fn test_clear_requires_shopping_view() {
        let mut session = new_session();
        session
            .shopping_mut()
            .add("Tomato Soup", vec![Ingredient::new("Tomato", "3")], "4");

        run_loop(&mut session, None, Cursor::new("clear\nquit\n")).unwrap();
        assert_eq!(session.shopping().total_item_count(), 1);

        run_loop(&mut session, None, Cursor::new("shopping\nclear\nquit\n")).unwrap();
        assert!(session.shopping().is_empty());
    }

    #[test]
    fn test_home_resets_transient_state() {
        let assistant = scripted();
        let mut session = new_session();
        run_loop(
            &mut session,
            Some(&assistant),
            Cursor::new("text tomatoes\ncook 1\nhome\nquit\n"),
        )
        .unwrap();

        assert_eq!(session.view(), View::Upload);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_filters_command_updates_session() {
        let mut session = new_session();
        run_loop(
            &mut session,
            None,
            Cursor::new("filters vegetarian, gluten-free\nquit\n"),
        )
        .unwrap();
        assert_eq!(session.filters(), &["vegetarian", "gluten-free"]);

        run_loop(&mut session, None, Cursor::new("filters none\nquit\n")).unwrap();
        assert!(session.filters().is_empty());
    }

    #[test]
    fn test_unknown_command_keeps_looping() {
        let mut session = new_session();
        run_loop(&mut session, None, Cursor::new("dance\nshopping\nquit\n")).unwrap();
        assert_eq!(session.view(), View::Shopping);
    }

    #[test]
    fn test_split_command_lowercases_and_trims() {
        assert_eq!(split_command("COOK 2"), ("cook".to_string(), "2"));
        assert_eq!(split_command("text  a b "), ("text".to_string(), "a b"));
        assert_eq!(split_command("quit"), ("quit".to_string(), ""));
    }
}

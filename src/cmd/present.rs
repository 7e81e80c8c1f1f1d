//! Shared console rendering for recipes, lists, and substitutions

use crate::favorites::Favorites;
use crate::fmt::{format_item_count, CART, STAR};
use crate::model::{Difficulty, Recipe, Substitution};
use crate::shopping::ShoppingList;
use crate::store::KeyValueStore;
use console::style;

/// Render the identified-ingredients line from an ingestion result.
pub fn print_identified_ingredients(ingredients: &[String]) {
    if ingredients.is_empty() {
        return;
    }
    println!(
        "Identified ingredients: {}",
        style(ingredients.join(", ")).cyan()
    );
    println!();
}

/// Render the numbered recipe list, starring saved favorites.
pub fn print_recipe_list<S: KeyValueStore>(recipes: &[Recipe], favorites: &Favorites<S>) {
    for (index, recipe) in recipes.iter().enumerate() {
        let marker = if favorites.is_favorite(&recipe.recipe_name) {
            format!("{}", STAR)
        } else {
            "  ".to_string()
        };
        println!(
            "{:>2}. {} {}",
            index + 1,
            style(&recipe.recipe_name).bold(),
            marker
        );
        println!(
            "    {} | {} | {} kcal | {}",
            difficulty_label(recipe.difficulty),
            recipe.prep_time,
            recipe.calories,
            recipe.servings
        );
    }
}

/// Render one recipe in full: header, ingredients, steps.
pub fn print_recipe_card(recipe: &Recipe) {
    println!("{}", style(&recipe.recipe_name).bold().underlined());
    println!(
        "{} | {} | {} kcal | {}",
        difficulty_label(recipe.difficulty),
        recipe.prep_time,
        recipe.calories,
        recipe.servings
    );
    println!();
    println!("{}", style("Ingredients:").bold());
    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        println!(
            "{:>2}. {} ({})",
            index + 1,
            ingredient.name,
            style(&ingredient.quantity).dim()
        );
    }
    println!();
    println!("{}", style("Steps:").bold());
    for (index, step) in recipe.steps.iter().enumerate() {
        println!("{:>2}. {}", index + 1, step);
    }
}

/// Render substitution suggestions for one ingredient.
pub fn print_substitutions(substitutions: &[Substitution]) {
    if substitutions.is_empty() {
        println!("No substitutions found.");
        return;
    }
    for substitution in substitutions {
        println!(
            "  {} {} ({})",
            style("-").dim(),
            style(&substitution.name).bold(),
            substitution.amount
        );
        if let Some(notes) = &substitution.notes {
            println!("    {}", style(notes).dim());
        }
    }
}

/// Render the shopping list with its badge count.
pub fn print_shopping_list<S: KeyValueStore>(list: &ShoppingList<S>) {
    if list.is_empty() {
        println!("Your shopping list is empty.");
        return;
    }
    for (index, entry) in list.entries().iter().enumerate() {
        println!(
            "{:>2}. {} {}",
            index + 1,
            style(&entry.recipe_name).bold(),
            style(&entry.servings).dim()
        );
        for (item_index, item) in entry.items.iter().enumerate() {
            println!(
                "    {:>2}. {} ({})",
                item_index + 1,
                item.name,
                style(&item.quantity).dim()
            );
        }
    }
    println!();
    println!("{} {}", CART, format_item_count(list.total_item_count()));
}

/// Render the favorites list.
pub fn print_favorites<S: KeyValueStore>(favorites: &Favorites<S>) {
    if favorites.is_empty() {
        println!("No favorite recipes yet.");
        return;
    }
    for (index, recipe) in favorites.recipes().iter().enumerate() {
        println!(
            "{:>2}. {} {}",
            index + 1,
            style(&recipe.recipe_name).bold(),
            STAR
        );
        println!(
            "    {} | {} | {}",
            difficulty_label(recipe.difficulty),
            recipe.prep_time,
            recipe.servings
        );
    }
}

fn difficulty_label(difficulty: Difficulty) -> String {
    let label = difficulty.to_string();
    match difficulty {
        Difficulty::Easy => style(label).green().to_string(),
        Difficulty::Medium => style(label).yellow().to_string(),
        Difficulty::Hard => style(label).red().to_string(),
    }
}

//! Shopping-list command
//!
//! Handles `smart-kitchen shopping`, operating directly on the persisted
//! document for the active namespace.

use crate::cmd::{present, AppContext};
use anyhow::Result;
use console::{style, Emoji};

static CART: Emoji = Emoji("🛒", "[CART]");

/// One shopping-list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoppingAction<'a> {
    /// Print the list and its badge count.
    Show,
    /// Remove one item (exact name match) from a recipe's entry.
    Remove {
        /// Recipe entry holding the item
        recipe: &'a str,
        /// Item name, compared exactly
        item: &'a str,
    },
    /// Remove a whole recipe entry.
    RemoveRecipe {
        /// Recipe entry to drop
        recipe: &'a str,
    },
    /// Clear the list and delete its stored document.
    Clear,
}

/// Run one shopping-list operation against the stored document.
pub fn cmd_shopping(action: ShoppingAction<'_>) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut list = ctx.shopping_list();

    match action {
        ShoppingAction::Show => {
            println!("{} {}", CART, style("Shopping list").bold());
            println!();
            present::print_shopping_list(&list);
        }
        ShoppingAction::Remove { recipe, item } => {
            let before = list.total_item_count();
            list.remove_item(recipe, item);
            if list.total_item_count() == before {
                println!("No item named '{}' under '{}'.", item, recipe);
                println!("Item names match exactly, including case.");
            } else {
                println!("Removed {} from {}.", style(item).bold(), recipe);
            }
        }
        ShoppingAction::RemoveRecipe { recipe } => {
            let before = list.entries().len();
            list.remove_recipe(recipe);
            if list.entries().len() == before {
                println!("No entry named '{}'.", recipe);
            } else {
                println!("Removed {} from the list.", style(recipe).bold());
            }
        }
        ShoppingAction::Clear => {
            list.clear();
            println!("Shopping list cleared.");
        }
    }
    Ok(())
}

//! Favorites command
//!
//! Handles `smart-kitchen favorites`, listing the saved recipes for the
//! active namespace.

use crate::cmd::{present, AppContext};
use anyhow::Result;
use console::{style, Emoji};

static STAR: Emoji = Emoji("⭐", "[FAV]");

/// Print the favorite recipes.
pub fn cmd_favorites() -> Result<()> {
    let ctx = AppContext::load()?;
    let favorites = ctx.favorites();

    println!("{} {}", STAR, style("Favorite recipes").bold());
    println!();
    present::print_favorites(&favorites);
    Ok(())
}

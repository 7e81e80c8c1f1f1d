//! Shared formatting utilities for console output

use console::Emoji;

/// Frying pan emoji for session start and headers
pub const PAN: Emoji = Emoji("🍳", ">");

/// Plate emoji for recipe listings
pub const PLATE: Emoji = Emoji("🍽️", "*");

/// Cart emoji for the shopping list
pub const CART: Emoji = Emoji("🛒", "[CART]");

/// Star emoji for favorites
pub const STAR: Emoji = Emoji("⭐", "[FAV]");

/// Magnifier emoji for identified ingredients
pub const MAGNIFIER: Emoji = Emoji("🔍", ">>");

/// Bulb emoji for substitution suggestions
pub const BULB: Emoji = Emoji("💡", "i");

/// Speaker emoji for speech output
pub const SPEAKER: Emoji = Emoji("🔊", "~");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Format an item count with its pluralized noun
///
/// # Examples
///
/// ```
/// use smart_kitchen::fmt::format_item_count;
///
/// assert_eq!(format_item_count(0), "0 items");
/// assert_eq!(format_item_count(1), "1 item");
/// assert_eq!(format_item_count(3), "3 items");
/// ```
pub fn format_item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

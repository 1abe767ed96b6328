//! Category filter - narrows the blog card grid by tag equality.
//!
//! Clicking a filter button moves the `active` class to exactly that button
//! and recomputes every card's visibility from scratch: visible iff the
//! button's category is the wildcard or equals the card's own category.
//! Shown cards get the fade-in cue; hidden cards drop it so the cue replays
//! the next time they appear.

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom::{self, ElementId};
use crate::events::pointer;
use crate::types::StyleFlags;

/// Class carried by the selected filter button.
pub const CLASS_ACTIVE: &str = "active";

/// Category value that matches every card.
pub const WILDCARD_CATEGORY: &str = "all";

const DATA_CATEGORY: &str = "data-category";

/// Wire the category filter. Requires at least one
/// `.category-filter button[data-category]` and one `.blog-card`.
pub fn init_category_filter(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let buttons = dom::query_all(".category-filter button[data-category]");
    let cards = dom::query_all(".blog-card");
    if buttons.is_empty() || cards.is_empty() {
        return InitOutcome::Skipped;
    }

    for &button in &buttons {
        let buttons = buttons.clone();
        let cards = cards.clone();
        cleanups.push(Box::new(pointer::on_click(button, move |_| {
            // The category is re-read on every click
            let Some(category) = dom::get_attribute(button, DATA_CATEGORY) else {
                return false;
            };
            select_button(&buttons, button);
            apply_filter(&cards, &category);
            false
        })));
    }

    InitOutcome::Initialized
}

/// Exactly one active button after every click.
fn select_button(buttons: &[ElementId], selected: ElementId) {
    for &button in buttons {
        dom::remove_class(button, CLASS_ACTIVE);
    }
    dom::add_class(selected, CLASS_ACTIVE);
}

/// Recompute every card's visibility against the selected category.
fn apply_filter(cards: &[ElementId], category: &str) {
    for &card in cards {
        let card_category = dom::get_attribute(card, DATA_CATEGORY);
        let matches =
            category == WILDCARD_CATEGORY || card_category.as_deref() == Some(category);

        if matches {
            dom::remove_style(card, StyleFlags::HIDDEN);
            dom::insert_style(card, StyleFlags::FADE_IN);
        } else {
            dom::insert_style(card, StyleFlags::HIDDEN);
            dom::remove_style(card, StyleFlags::FADE_IN);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Accordion - a single toggle/content pair as a two-state switch.
//!
//! The toggle's class membership is the source of truth; `aria-expanded`
//! mirrors it on every flip so assistive tech stays in sync with the
//! visual state.

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom;
use crate::events::pointer;

/// Class carried by an expanded toggle and its content panel.
pub const CLASS_EXPANDED: &str = "expanded";

const ARIA_EXPANDED: &str = "aria-expanded";

/// Wire the accordion toggle. Requires `.accordion-toggle` and
/// `.accordion-content`.
pub fn init_accordion(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let Some(toggle) = dom::query(".accordion-toggle") else { return InitOutcome::Skipped };
    let Some(content) = dom::query(".accordion-content") else { return InitOutcome::Skipped };

    cleanups.push(Box::new(pointer::on_click(toggle, move |_| {
        if dom::has_class(toggle, CLASS_EXPANDED) {
            dom::remove_class(toggle, CLASS_EXPANDED);
            dom::remove_class(content, CLASS_EXPANDED);
            dom::set_attribute(toggle, ARIA_EXPANDED, "false");
        } else {
            dom::add_class(toggle, CLASS_EXPANDED);
            dom::add_class(content, CLASS_EXPANDED);
            dom::set_attribute(toggle, ARIA_EXPANDED, "true");
        }
        false
    })));

    InitOutcome::Initialized
}

// =============================================================================
// TESTS
// =============================================================================

//! FAQ accordion - multiple items, at most one open.
//!
//! Clicking a question clears the active marker from every sibling item
//! before toggling its own, so a click on the sole open item closes it and
//! leaves zero items open. Items without a question sub-element are inert.

use std::rc::Rc;

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom::{self, ElementId};
use crate::events::pointer;

/// Class carried by the open FAQ item.
pub const CLASS_ACTIVE: &str = "active";

/// Wire every `.faq-item` that has a `.faq-question` child.
pub fn init_faq(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let items = Rc::new(dom::query_all(".faq-item"));
    if items.is_empty() {
        return InitOutcome::Skipped;
    }

    for &item in items.iter() {
        let Some(question) = dom::query_within(item, ".faq-question") else { continue };

        let items = items.clone();
        cleanups.push(Box::new(pointer::on_click(question, move |_| {
            activate(&items, item);
            false
        })));
    }

    InitOutcome::Initialized
}

/// Close every other item, then flip the clicked one.
fn activate(items: &[ElementId], item: ElementId) {
    for &other in items {
        if other != item {
            dom::remove_class(other, CLASS_ACTIVE);
        }
    }
    dom::toggle_class(item, CLASS_ACTIVE);
}

// =============================================================================
// TESTS
// =============================================================================

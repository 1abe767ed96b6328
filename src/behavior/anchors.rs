//! Smooth anchor scroll - intercepts same-page hash links.
//!
//! A click on `a[href^="#"]` whose target exists suppresses the native
//! navigation and requests a smooth scroll to the target's top, minus the
//! fixed header's height and a fixed visual margin. The bare `"#"`
//! placeholder and hashes with no matching element are left to the host.

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom;
use crate::events::{pointer, viewport};
use crate::types::ScrollBehavior;

/// Visual gap kept between the header and the scrolled-to element.
pub const SCROLL_MARGIN: f32 = 20.0;

/// Wire every same-page hash link present at initialization.
pub fn init_smooth_scroll(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let anchors = dom::query_all("a[href^=\"#\"]");
    if anchors.is_empty() {
        return InitOutcome::Skipped;
    }

    for anchor in anchors {
        cleanups.push(Box::new(pointer::on_click(anchor, move |event| {
            let Some(href) = dom::get_attribute(event.target, "href") else {
                return false;
            };
            // The href is re-read on every click; bare placeholder links
            // are explicitly ignored
            let Some(fragment) = href.strip_prefix('#') else { return false };
            if fragment.is_empty() {
                return false;
            }
            let Some(target) = dom::element_by_id(fragment) else {
                return false;
            };

            let header_height =
                dom::query(".header").map(dom::offset_height).unwrap_or(0.0);
            let top = dom::offset_top(target) - header_height - SCROLL_MARGIN;
            viewport::scroll_to(top, ScrollBehavior::Smooth);
            true
        })));
    }

    InitOutcome::Initialized
}

// =============================================================================
// TESTS
// =============================================================================

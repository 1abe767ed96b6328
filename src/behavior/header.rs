//! Header scroll shadow - drop shadow once the page scrolls past a threshold.
//!
//! Stateless per-event recomputation: every scroll event sets or clears the
//! shadow flag from the offset alone. At exactly the threshold the shadow
//! is off; it appears strictly past it.

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom;
use crate::events::viewport;
use crate::types::StyleFlags;

/// Scroll offset beyond which the header casts its shadow.
pub const SHADOW_THRESHOLD: f32 = 50.0;

/// Wire the header shadow. Requires `.header`.
pub fn init_header_shadow(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let Some(header) = dom::query(".header") else { return InitOutcome::Skipped };

    cleanups.push(Box::new(viewport::on_scroll(move |y| {
        if y > SHADOW_THRESHOLD {
            dom::insert_style(header, StyleFlags::DROP_SHADOW);
        } else {
            dom::remove_style(header, StyleFlags::DROP_SHADOW);
        }
    })));

    InitOutcome::Initialized
}

// =============================================================================
// TESTS
// =============================================================================

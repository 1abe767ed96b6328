//! Off-canvas navigation - panel open/close with overlay and Escape.
//!
//! The menu-open flag is pure class state: `active` on the panel and its
//! overlay, `menu-open` on the body. Open and close are unconditional class
//! edits, so repeating either is a no-op in effect.
//!
//! # Example
//!
//! ```ignore
//! use page_behavior::behavior::nav;
//!
//! let mut cleanups = Vec::new();
//! let outcome = nav::init_navigation(&mut cleanups);
//! ```

use crate::behavior::{Cleanup, InitOutcome};
use crate::dom::{self, ElementId};
use crate::events::{keyboard, pointer};

/// Class carried by an open panel and its overlay.
pub const CLASS_ACTIVE: &str = "active";

/// Class carried by the body while the menu is open.
pub const CLASS_MENU_OPEN: &str = "menu-open";

/// Value of `data-action` that opens the menu from a mobile nav item.
pub const ACTION_OPEN_MENU: &str = "open-menu";

// =============================================================================
// OPERATIONS
// =============================================================================

/// Mark the panel, overlay and body as open. Idempotent.
pub fn open_menu(panel: ElementId, overlay: ElementId) {
    dom::add_class(panel, CLASS_ACTIVE);
    dom::add_class(overlay, CLASS_ACTIVE);
    dom::add_class(dom::body(), CLASS_MENU_OPEN);
}

/// Clear the open markers from the panel, overlay and body. Idempotent.
pub fn close_menu(panel: ElementId, overlay: ElementId) {
    dom::remove_class(panel, CLASS_ACTIVE);
    dom::remove_class(overlay, CLASS_ACTIVE);
    dom::remove_class(dom::body(), CLASS_MENU_OPEN);
}

/// Whether the panel currently carries the open marker.
pub fn is_menu_open(panel: ElementId) -> bool {
    dom::has_class(panel, CLASS_ACTIVE)
}

// =============================================================================
// INITIALIZERS
// =============================================================================

/// Wire the off-canvas menu: toggle opens; close control, overlay and
/// Escape close. Requires `.menu-toggle`, `.offcanvas` and
/// `.offcanvas-overlay`; the close control is wired when present.
pub fn init_navigation(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let Some(toggle) = dom::query(".menu-toggle") else { return InitOutcome::Skipped };
    let Some(panel) = dom::query(".offcanvas") else { return InitOutcome::Skipped };
    let Some(overlay) = dom::query(".offcanvas-overlay") else { return InitOutcome::Skipped };

    cleanups.push(Box::new(pointer::on_click(toggle, move |_| {
        open_menu(panel, overlay);
        false
    })));

    if let Some(close) = dom::query(".offcanvas-close") {
        cleanups.push(Box::new(pointer::on_click(close, move |_| {
            close_menu(panel, overlay);
            false
        })));
    }

    cleanups.push(Box::new(pointer::on_click(overlay, move |_| {
        close_menu(panel, overlay);
        false
    })));

    // Escape closes only while the panel is marked open
    cleanups.push(Box::new(keyboard::on_key("Escape", move || {
        if is_menu_open(panel) {
            close_menu(panel, overlay);
            true
        } else {
            false
        }
    })));

    InitOutcome::Initialized
}

/// Wire mobile nav items: clicking an item whose `data-action` is
/// `open-menu` opens the panel. The action is re-read on every click, so
/// the host may retarget items after initialization.
pub fn init_mobile_nav(cleanups: &mut Vec<Cleanup>) -> InitOutcome {
    let items = dom::query_all(".mobile-nav-item[data-action]");
    if items.is_empty() {
        return InitOutcome::Skipped;
    }
    let Some(panel) = dom::query(".offcanvas") else { return InitOutcome::Skipped };
    let Some(overlay) = dom::query(".offcanvas-overlay") else { return InitOutcome::Skipped };

    for item in items {
        cleanups.push(Box::new(pointer::on_click(item, move |event| {
            let action = dom::get_attribute(event.target, "data-action");
            if action.as_deref() == Some(ACTION_OPEN_MENU) {
                open_menu(panel, overlay);
            }
            false
        })));
    }

    InitOutcome::Initialized
}

// =============================================================================
// TESTS
// =============================================================================

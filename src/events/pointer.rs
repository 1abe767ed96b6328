//! Pointer Module - Per-element click dispatch
//!
//! Click listeners attach to individual elements, the way the page behaviors
//! use them. A handler returning `true` marks the click's default action
//! (e.g. hash navigation) as prevented; [`click`] reports that back to the
//! host so it knows whether to run its native behavior.
//!
//! # API
//!
//! - `last_click` - Get last click event
//! - `click(target)` - Deliver a click; returns true if default was prevented
//! - `on_click(target, fn)` - Subscribe to clicks on one element
//!
//! # Example
//!
//! ```ignore
//! use page_behavior::events::pointer;
//!
//! let cleanup = pointer::on_click(element, |event| {
//!     println!("clicked {:?}", event.target);
//!     false // Leave the default action alone
//! });
//!
//! pointer::click(element);
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::dom::ElementId;

// =============================================================================
// TYPES
// =============================================================================

/// A pointer click on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The element the click landed on.
    pub target: ElementId,
}

/// Handler for click events. Return true to prevent the default action.
pub type ClickHandler = Rc<dyn Fn(&ClickEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

struct HandlerRegistry {
    element_handlers: HashMap<ElementId, Vec<(usize, ClickHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self { element_handlers: HashMap::new(), next_id: 0 }
    }
}

thread_local! {
    static LAST_CLICK: Signal<Option<ClickEvent>> = signal(None);

    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

/// Get the last click event
pub fn last_click() -> Option<ClickEvent> {
    LAST_CLICK.with(|s| s.get())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Deliver a click to `target`'s handlers, in registration order.
/// Returns true if any handler prevented the default action.
pub fn click(target: ElementId) -> bool {
    let event = ClickEvent { target };
    LAST_CLICK.with(|s| s.set(Some(event)));

    // Clone handlers out of the registry first - handlers mutate the DOM
    // and may register or remove listeners while they run.
    let handlers: Vec<ClickHandler> = REGISTRY.with(|reg| {
        reg.borrow()
            .element_handlers
            .get(&target)
            .map(|hs| hs.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    });

    let mut prevented = false;
    for handler in handlers {
        if handler(&event) {
            prevented = true;
        }
    }
    prevented
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to clicks on one element.
/// Return true from handler to prevent the default action.
/// Returns cleanup function.
pub fn on_click<F>(target: ElementId, handler: F) -> impl FnOnce()
where
    F: Fn(&ClickEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.element_handlers
            .entry(target)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.element_handlers.get_mut(&target) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.element_handlers.remove(&target);
                }
            }
        });
    }
}

/// Clear all state and handlers.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.element_handlers.clear();
    });
    LAST_CLICK.with(|s| s.set(None));
}

/// Reset pointer state (for testing)
pub fn reset_pointer_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use std::cell::Cell;

    fn setup() {
        dom::reset_document();
        reset_pointer_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_click().is_none());
    }

    #[test]
    fn test_click_reaches_target_only() {
        setup();
        let a = dom::create_element("button");
        let b = dom::create_element("button");

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let _cleanup = on_click(a, move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        click(b);
        assert_eq!(count.get(), 0);

        click(a);
        assert_eq!(count.get(), 1);
        assert_eq!(last_click(), Some(ClickEvent { target: a }));
    }

    #[test]
    fn test_prevent_default() {
        setup();
        let el = dom::create_element("a");

        // No handlers - default runs
        assert!(!click(el));

        let _c1 = on_click(el, |_| false);
        assert!(!click(el));

        let _c2 = on_click(el, |_| true);
        assert!(click(el));
    }

    #[test]
    fn test_all_handlers_run() {
        setup();
        let el = dom::create_element("button");

        let order = Rc::new(RefCell::new(Vec::new()));
        let o1 = order.clone();
        let o2 = order.clone();

        // Preventing the default does not stop later listeners
        let _c1 = on_click(el, move |_| {
            o1.borrow_mut().push(1);
            true
        });
        let _c2 = on_click(el, move |_| {
            o2.borrow_mut().push(2);
            false
        });

        assert!(click(el));
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_cleanup_detaches() {
        setup();
        let el = dom::create_element("button");

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = on_click(el, move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        click(el);
        cleanup();
        click(el);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_may_mutate_dom() {
        setup();
        let el = dom::create_element("button");

        let _c = on_click(el, move |event| {
            dom::add_class(event.target, "active");
            false
        });

        click(el);
        assert!(dom::has_class(el, "active"));
    }
}

//! Viewport Module - Scroll position state and scroll requests
//!
//! The vertical scroll offset lives in a signal fed by the host on every
//! scroll event. Behaviors that want to move the viewport issue a
//! [`ScrollRequest`]; the host owns the actual animation and reports
//! progress back through `dispatch_scroll`.
//!
//! # API
//!
//! - `scroll_y` - Current vertical scroll offset
//! - `dispatch_scroll(y)` - Deliver a host scroll event
//! - `on_scroll(fn)` - Subscribe to scroll events
//! - `scroll_to(top, behavior)` - Request a viewport scroll
//! - `last_scroll_request` - The most recent request, if any
//!
//! # Example
//!
//! ```ignore
//! use page_behavior::events::viewport;
//! use page_behavior::ScrollBehavior;
//!
//! let cleanup = viewport::on_scroll(|y| println!("scrolled to {y}"));
//!
//! viewport::dispatch_scroll(120.0);
//! viewport::scroll_to(640.0, ScrollBehavior::Smooth);
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::types::{ScrollBehavior, ScrollRequest};

// =============================================================================
// TYPES
// =============================================================================

/// Handler for scroll events. Receives the new vertical offset.
pub type ScrollHandler = Rc<dyn Fn(f32)>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static SCROLL_Y: Signal<f32> = signal(0.0);

    static LAST_REQUEST: Signal<Option<ScrollRequest>> = signal(None);

    static HANDLERS: RefCell<Vec<(usize, ScrollHandler)>> = RefCell::new(Vec::new());

    static NEXT_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Current vertical scroll offset.
pub fn scroll_y() -> f32 {
    SCROLL_Y.with(|s| s.get())
}

/// The most recent scroll request issued by a behavior.
pub fn last_scroll_request() -> Option<ScrollRequest> {
    LAST_REQUEST.with(|s| s.get())
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Deliver a host scroll event: update the offset signal, then run every
/// scroll handler with the new value. Handlers do not consume.
pub fn dispatch_scroll(y: f32) {
    SCROLL_Y.with(|s| s.set(y));

    let handlers: Vec<ScrollHandler> = HANDLERS.with(|hs| {
        hs.borrow().iter().map(|(_, h)| h.clone()).collect()
    });
    for handler in handlers {
        handler(y);
    }
}

/// Request a viewport scroll. Negative targets clamp to zero, matching the
/// host's behavior at the top of the document.
pub fn scroll_to(top: f32, behavior: ScrollBehavior) {
    let request = ScrollRequest { top: top.max(0.0), behavior };
    LAST_REQUEST.with(|s| s.set(Some(request)));
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to scroll events. Returns cleanup function.
pub fn on_scroll<F>(handler: F) -> impl FnOnce()
where
    F: Fn(f32) + 'static,
{
    let id = NEXT_ID.with(|n| {
        let mut n = n.borrow_mut();
        let id = *n;
        *n += 1;
        id
    });
    HANDLERS.with(|hs| hs.borrow_mut().push((id, Rc::new(handler))));

    move || {
        HANDLERS.with(|hs| {
            hs.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Clear all handlers and reset offsets (for testing)
pub fn reset_viewport() {
    HANDLERS.with(|hs| hs.borrow_mut().clear());
    NEXT_ID.with(|n| *n.borrow_mut() = 0);
    SCROLL_Y.with(|s| s.set(0.0));
    LAST_REQUEST.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_viewport();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert_eq!(scroll_y(), 0.0);
        assert!(last_scroll_request().is_none());
    }

    #[test]
    fn test_dispatch_updates_offset() {
        setup();
        dispatch_scroll(120.5);
        assert_eq!(scroll_y(), 120.5);
    }

    #[test]
    fn test_scroll_handlers_receive_offset() {
        setup();

        let seen = Rc::new(Cell::new(0.0f32));
        let seen_clone = seen.clone();
        let cleanup = on_scroll(move |y| seen_clone.set(y));

        dispatch_scroll(75.0);
        assert_eq!(seen.get(), 75.0);

        cleanup();
        dispatch_scroll(10.0);
        assert_eq!(seen.get(), 75.0); // Handler detached
    }

    #[test]
    fn test_scroll_to_records_request() {
        setup();

        scroll_to(640.0, ScrollBehavior::Smooth);
        assert_eq!(
            last_scroll_request(),
            Some(ScrollRequest { top: 640.0, behavior: ScrollBehavior::Smooth })
        );
    }

    #[test]
    fn test_scroll_to_clamps_negative() {
        setup();

        scroll_to(-35.0, ScrollBehavior::Auto);
        assert_eq!(
            last_scroll_request(),
            Some(ScrollRequest { top: 0.0, behavior: ScrollBehavior::Auto })
        );
    }
}

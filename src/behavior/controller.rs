//! Page controller - wires every sub-behavior exactly once.
//!
//! [`PageController::init`] runs all initializers immediately when the
//! document has already left `Loading`, and defers them onto the ready
//! queue otherwise, so listeners never attach to not-yet-existing nodes.
//! The controller records one [`InitOutcome`] per sub-behavior and holds
//! every cleanup until [`PageController::cleanup`].
//!
//! # Example
//!
//! ```ignore
//! use page_behavior::PageController;
//!
//! let controller = PageController::init();
//! if let Some(outcomes) = controller.outcomes() {
//!     println!("navigation: {:?}", outcomes.navigation);
//! }
//!
//! // Tear everything down
//! controller.cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::behavior::{Cleanup, InitOutcome, accordion, anchors, faq, filter, header, nav};
use crate::dom;

// =============================================================================
// TYPES
// =============================================================================

/// One outcome per sub-behavior, in initialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorOutcomes {
    pub navigation: InitOutcome,
    pub accordion: InitOutcome,
    pub mobile_nav: InitOutcome,
    pub faq: InitOutcome,
    pub category_filter: InitOutcome,
    pub smooth_scroll: InitOutcome,
    pub header_shadow: InitOutcome,
}

#[derive(Default)]
struct Inner {
    outcomes: Option<BehaviorOutcomes>,
    cleanups: Vec<Cleanup>,
}

/// Handle over the wired page. Dropping it leaves listeners attached;
/// call [`PageController::cleanup`] to detach them.
pub struct PageController {
    inner: Rc<RefCell<Inner>>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

impl PageController {
    /// Wire all sub-behaviors, now or on document ready.
    pub fn init() -> Self {
        let inner = Rc::new(RefCell::new(Inner::default()));

        let deferred = inner.clone();
        dom::on_ready(move || {
            let mut state = deferred.borrow_mut();
            let mut cleanups = Vec::new();
            state.outcomes = Some(wire_all(&mut cleanups));
            state.cleanups = cleanups;
        });

        Self { inner }
    }

    /// Whether initialization has run (false only while the document is
    /// still loading).
    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().outcomes.is_some()
    }

    /// Per-behavior outcomes, once initialization has run.
    pub fn outcomes(&self) -> Option<BehaviorOutcomes> {
        self.inner.borrow().outcomes
    }

    /// Detach every listener this controller attached.
    pub fn cleanup(self) {
        let cleanups = std::mem::take(&mut self.inner.borrow_mut().cleanups);
        for cleanup in cleanups {
            cleanup();
        }
    }
}

/// Run every initializer in sequence. Each guards its own elements, so
/// one missing feature never blocks the rest.
fn wire_all(cleanups: &mut Vec<Cleanup>) -> BehaviorOutcomes {
    BehaviorOutcomes {
        navigation: nav::init_navigation(cleanups),
        accordion: accordion::init_accordion(cleanups),
        mobile_nav: nav::init_mobile_nav(cleanups),
        faq: faq::init_faq(cleanups),
        category_filter: filter::init_category_filter(cleanups),
        smooth_scroll: anchors::init_smooth_scroll(cleanups),
        header_shadow: header::init_header_shadow(cleanups),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{keyboard, pointer, viewport};
    use crate::types::ReadyState;

    fn setup() {
        dom::reset_document();
        pointer::reset_pointer_state();
        keyboard::reset_keyboard_state();
        viewport::reset_viewport();
    }

    fn build_minimal_nav() -> crate::dom::ElementId {
        let toggle = dom::create_element("button");
        dom::add_class(toggle, "menu-toggle");
        let panel = dom::create_element("nav");
        dom::add_class(panel, "offcanvas");
        let overlay = dom::create_element("div");
        dom::add_class(overlay, "offcanvas-overlay");
        dom::append_child(dom::body(), toggle);
        dom::append_child(dom::body(), panel);
        dom::append_child(dom::body(), overlay);
        toggle
    }

    #[test]
    fn test_init_runs_immediately_when_ready() {
        setup();
        build_minimal_nav();
        dom::set_ready_state(ReadyState::Interactive);

        let controller = PageController::init();
        assert!(controller.is_initialized());

        let outcomes = controller.outcomes().unwrap();
        assert_eq!(outcomes.navigation, InitOutcome::Initialized);
        assert_eq!(outcomes.faq, InitOutcome::Skipped);
        assert_eq!(outcomes.header_shadow, InitOutcome::Skipped);
    }

    #[test]
    fn test_init_defers_while_loading() {
        setup();

        let controller = PageController::init();
        assert!(!controller.is_initialized());
        assert!(controller.outcomes().is_none());

        // Nodes appear while still loading, then the ready signal fires
        build_minimal_nav();
        dom::set_ready_state(ReadyState::Interactive);

        assert!(controller.is_initialized());
        assert_eq!(
            controller.outcomes().unwrap().navigation,
            InitOutcome::Initialized
        );
    }

    #[test]
    fn test_deferred_init_sees_late_nodes() {
        setup();
        let controller = PageController::init();

        let toggle = build_minimal_nav();
        dom::set_ready_state(ReadyState::Complete);

        // The listener attached to the node created after init() was called
        pointer::click(toggle);
        let panel = dom::query(".offcanvas").unwrap();
        assert!(dom::has_class(panel, "active"));
        let _ = controller;
    }

    #[test]
    fn test_missing_features_do_not_block_others() {
        setup();
        // Only a header on this page - everything else absent
        let header_el = dom::create_element("header");
        dom::add_class(header_el, "header");
        dom::append_child(dom::body(), header_el);
        dom::set_ready_state(ReadyState::Interactive);

        let controller = PageController::init();
        let outcomes = controller.outcomes().unwrap();

        assert_eq!(outcomes.navigation, InitOutcome::Skipped);
        assert_eq!(outcomes.accordion, InitOutcome::Skipped);
        assert_eq!(outcomes.mobile_nav, InitOutcome::Skipped);
        assert_eq!(outcomes.faq, InitOutcome::Skipped);
        assert_eq!(outcomes.category_filter, InitOutcome::Skipped);
        assert_eq!(outcomes.smooth_scroll, InitOutcome::Skipped);
        assert_eq!(outcomes.header_shadow, InitOutcome::Initialized);

        // The one initialized behavior works
        viewport::dispatch_scroll(120.0);
        assert!(dom::style(header_el).contains(crate::types::StyleFlags::DROP_SHADOW));
    }

    #[test]
    fn test_cleanup_detaches_listeners() {
        setup();
        let toggle = build_minimal_nav();
        dom::set_ready_state(ReadyState::Interactive);

        let controller = PageController::init();
        controller.cleanup();

        pointer::click(toggle);
        let panel = dom::query(".offcanvas").unwrap();
        assert!(!dom::has_class(panel, "active"));
    }
}

//! Behavior Module - The page's sub-behaviors and their controller
//!
//! Seven independent listener-registration groups, composed only by being
//! initialized in sequence. Each initializer checks its own required
//! elements and reports a discriminated [`InitOutcome`] instead of failing:
//! a page without a blog grid still gets its navigation wired.
//!
//! - [`nav`] - Off-canvas navigation (open/close/Escape) and mobile nav
//! - [`accordion`] - Single two-state accordion with aria mirroring
//! - [`faq`] - Multi-item FAQ accordion, at most one open
//! - [`filter`] - Blog card category filter
//! - [`anchors`] - Smooth same-page anchor scrolling
//! - [`header`] - Header shadow past the scroll threshold
//! - [`controller`] - Wires everything once the document is ready

pub mod accordion;
pub mod anchors;
pub mod controller;
pub mod faq;
pub mod filter;
pub mod header;
pub mod nav;

pub use controller::{BehaviorOutcomes, PageController};

/// Cleanup function that detaches a behavior's listeners.
pub type Cleanup = Box<dyn FnOnce()>;

/// What initializing one sub-behavior produced.
///
/// A missing required element is an expected page shape, not an error,
/// so it is a value the controller records rather than a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// All required elements were present; listeners are attached.
    Initialized,
    /// A required element was missing; nothing was attached.
    Skipped,
}

impl InitOutcome {
    /// Whether listeners were attached.
    pub fn is_initialized(self) -> bool {
        self == Self::Initialized
    }
}

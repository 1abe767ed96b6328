//! # page-behavior
//!
//! Headless page behavior engine: the client-side interaction layer of a
//! marketing site (off-canvas navigation, accordions, a blog category
//! filter, smooth anchor scrolling, a header scroll shadow) modeled as a
//! testable Rust library.
//!
//! ## Architecture
//!
//! Elements are indices into a thread-local arena; behaviors subscribe to
//! host events and mutate class lists and named style flags:
//!
//! ```text
//! Host events (click / keydown / scroll)
//!        → event registries (pointer, keyboard, viewport)
//!        → behaviors (class + StyleFlags mutations)
//!        → host styling layer paints the result
//! ```
//!
//! Everything runs single-threaded and synchronously: a dispatched event
//! runs its handlers to completion before returning, so no handler ever
//! observes another handler mid-mutation.
//!
//! ## Modules
//!
//! - [`types`] - Core types (StyleFlags, ScrollBehavior, ReadyState)
//! - [`dom`] - Element arena, selector queries, document readiness
//! - [`events`] - Keyboard, pointer and viewport event plumbing
//! - [`behavior`] - The seven sub-behaviors and the page controller

pub mod behavior;
pub mod dom;
pub mod events;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use dom::ElementId;

pub use behavior::{BehaviorOutcomes, InitOutcome, PageController};

pub use events::keyboard::{KeyState, KeyboardEvent, Modifiers};
pub use events::pointer::ClickEvent;
pub use events::viewport::{dispatch_scroll, scroll_y};

//! DOM Module - Headless document model
//!
//! A thread-local element arena with the handful of operations the page
//! behaviors need: class lists, attributes, host-supplied geometry, named
//! style flags, selector queries and the document-ready lifecycle.
//!
//! - [`arena`] - Element storage and the free-function API
//! - [`selector`] - The supported selector grammar

mod arena;
pub mod selector;

pub use arena::*;

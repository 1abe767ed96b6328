//! Events Module - Host event plumbing
//!
//! The host environment feeds events into these registries; behaviors
//! subscribe with cleanup-returning `on_*` functions:
//!
//! - **Keyboard** - Document-level key events (Escape handling)
//! - **Pointer** - Per-element click dispatch with prevent-default
//! - **Viewport** - Scroll offset signal and scroll requests

pub mod keyboard;
pub mod pointer;
pub mod viewport;

//! Core types shared across the engine.
//!
//! Presentation state is modeled as named variants instead of raw style
//! strings: behaviors toggle [`StyleFlags`] and the host's styling layer owns
//! the concrete values (shadow color, animation curve, display property).

// =============================================================================
// Style Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-element presentation state as a bitfield.
    ///
    /// Combine with bitwise OR: `StyleFlags::HIDDEN | StyleFlags::FADE_IN`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleFlags: u8 {
        const NONE = 0;
        /// Element is removed from the visual flow (display: none).
        const HIDDEN = 1 << 0;
        /// Element carries a drop shadow.
        const DROP_SHADOW = 1 << 1;
        /// Element plays its fade-in cue on next paint.
        const FADE_IN = 1 << 2;
    }
}

// =============================================================================
// Scroll
// =============================================================================

/// How a requested viewport scroll should be performed.
///
/// The engine only records the request; the host environment owns the
/// animation and reports progress back through scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump directly to the target offset.
    #[default]
    Auto,
    /// Animate to the target offset.
    Smooth,
}

/// A viewport scroll request issued by a behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Target vertical offset in document units (never negative).
    pub top: f32,
    /// Requested animation mode.
    pub behavior: ScrollBehavior,
}

// =============================================================================
// Document Readiness
// =============================================================================

/// Document readiness, mirroring the host's load lifecycle.
///
/// Behaviors must not attach listeners while the document is still
/// [`ReadyState::Loading`] - the nodes they target may not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// The document is still being parsed.
    #[default]
    Loading,
    /// The document has been parsed; resources may still be loading.
    Interactive,
    /// The document and all resources have finished loading.
    Complete,
}

impl ReadyState {
    /// Whether deferred work may run now.
    pub fn is_ready(self) -> bool {
        self != Self::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_flags_combine() {
        let flags = StyleFlags::HIDDEN | StyleFlags::FADE_IN;
        assert!(flags.contains(StyleFlags::HIDDEN));
        assert!(flags.contains(StyleFlags::FADE_IN));
        assert!(!flags.contains(StyleFlags::DROP_SHADOW));
    }

    #[test]
    fn test_style_flags_default_empty() {
        assert_eq!(StyleFlags::default(), StyleFlags::NONE);
    }

    #[test]
    fn test_ready_state() {
        assert!(!ReadyState::Loading.is_ready());
        assert!(ReadyState::Interactive.is_ready());
        assert!(ReadyState::Complete.is_ready());
        assert_eq!(ReadyState::default(), ReadyState::Loading);
    }
}

//! Shared component rendering context
//!
//! `ComponentContext` carries UI metadata that panels may need during
//! rendering and event handling: whether the hosting window is focused, and
//! the shell's tick clock so fake-async content can decide whether it has
//! "arrived" without reading the wall clock itself.

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    now: Instant,
}

impl ComponentContext {
    pub const fn new(focused: bool, now: Instant) -> Self {
        Self { focused, now }
    }

    /// Returns whether the hosting window is focused.
    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// Tick time of the current frame or event.
    pub const fn now(&self) -> Instant {
        self.now
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false, Instant::now())
    }
}

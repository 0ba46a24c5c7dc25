//! Cancel-and-reset debouncing.
//!
//! [`DebounceGate`] is the timer-free core of a debounce: every trigger arms
//! a new generation, invalidating all earlier ones. Callers sleep for the
//! debounce window and then fire only if their generation is still current,
//! so a burst of triggers collapses into the single newest one.

use std::cell::Cell;
use std::rc::Rc;

/// Generation counter shared between a trigger site and its delayed action.
#[derive(Clone, Default)]
pub struct DebounceGate {
    generation: Rc<Cell<u64>>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new trigger, invalidating every pending one.
    ///
    /// Returns the generation to pass to [`DebounceGate::is_current`] after
    /// the debounce window elapses.
    pub fn arm(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    /// Whether `generation` is still the newest trigger.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}

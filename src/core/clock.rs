//! Time sources for the engine
//!
//! The engine never reads wall-clock time directly. Hosts pick a clock:
//! `SystemClock` for live sessions, `ManualClock` for tests and headless
//! runs where time only moves when the caller advances it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::core::types::Millis;

/// Source of "now" on the engine timeline
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Milliseconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Caller-driven clock. Clones share the same time cell, so a test can keep
/// one handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

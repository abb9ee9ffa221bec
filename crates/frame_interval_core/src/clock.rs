use instant::{Duration, Instant};
use std::{cell::Cell, rc::Rc};

use crate::Clock;

/// Monotonic clock backed by [instant::Instant].
///
/// On wasm32 this reads `performance.now()`, elsewhere the OS monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl Default for InstantClock {
    fn default() -> Self {
        InstantClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so one copy can be handed to a timer while
/// the driver keeps another to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        ManualClock(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, by: Duration) {
        self.advance_ms(by.as_secs_f64() * 1000.0);
    }

    pub fn advance_ms(&self, by_ms: f64) {
        self.0.set(self.0.get() + by_ms);
    }

    pub fn set_ms(&self, now_ms: f64) {
        self.0.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

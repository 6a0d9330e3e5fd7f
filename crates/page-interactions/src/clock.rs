//! Time sources for deferred effects.
//!
//! The engine never reads wall-clock time directly. Browsers supply
//! `performance.now()`; tests and scripted drivers use [`ManualClock`] so
//! every deferred effect fires exactly when the test says so.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Manually advanced clock
///
/// Clones share the same time, so a test can keep one handle while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Create a clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at a fixed time
    #[must_use]
    pub fn at(ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time; going backwards is ignored
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now_ms(), 0);
        assert_eq!(ManualClock::at(42).now_ms(), 42);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let engine_side = clock.clone();
        clock.advance(400);
        assert_eq!(engine_side.now_ms(), 400);
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::at(100);
        clock.set(50);
        assert_eq!(clock.now_ms(), 100);
        clock.set(150);
        assert_eq!(clock.now_ms(), 150);
    }
}

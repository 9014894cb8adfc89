//! Injected time source.
//!
//! Engine functions take timestamps as arguments and never read the system
//! clock; the `Clock` trait is how the I/O layer obtains those timestamps,
//! so every computation stays deterministic under test.

use chrono::NaiveDateTime;

pub trait Clock {
    /// Current wall-clock time in site-local terms.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time. Lives at the I/O edge only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock pinned to a single instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

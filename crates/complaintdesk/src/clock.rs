//! Time source for submissions and ID generation.

use chrono::{Local, NaiveDateTime};

/// Supplies the current server time.
pub trait Clock {
    /// The current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// The process's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

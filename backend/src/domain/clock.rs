//! Time source abstraction.
//!
//! Cooldown checks and record timestamps read the current time through
//! [`Clock`] so tests can pin or advance time deterministically.

use chrono::{DateTime, Utc};
use std::fmt;

pub trait Clock: Send + Sync + fmt::Debug {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

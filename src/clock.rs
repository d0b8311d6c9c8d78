//! Injectable time source.
//!
//! The authenticator's lockout window and session expiry are pure functions
//! of "now", so tests inject a fixed clock instead of reaching for the system
//! time.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// A clock that is either the system time or a fixed, test-controlled instant.
#[derive(Clone, Debug)]
pub enum Clock {
    /// Wall-clock time.
    System,
    /// Fixed instant stored as unix microseconds, advanceable from tests.
    Fixed(Arc<AtomicI64>),
}

impl Clock {
    pub fn system() -> Self {
        Clock::System
    }

    /// A clock frozen at `at` until advanced.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Clock::Fixed(Arc::new(AtomicI64::new(at.timestamp_micros())))
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(micros) => {
                DateTime::<Utc>::from_timestamp_micros(micros.load(Ordering::SeqCst))
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            }
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&self, by: Duration) {
        if let Clock::Fixed(micros) = self {
            micros.fetch_add(by.num_microseconds().unwrap_or(0), Ordering::SeqCst);
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}

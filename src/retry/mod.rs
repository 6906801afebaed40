//! Re-running a function that may panic until it succeeds.
//!
//! [`retry`] wraps a function so that every call is attempted up to
//! [`RetryPolicy::attempts`] times, sleeping [`RetryPolicy::delay`] between
//! attempts. Each attempt is run with [`Outcome::of`], so a panic counts as a
//! failed attempt rather than unwinding through the caller.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::Cell;
//! use std::time::Duration;
//!
//! use fncore::control::Outcome;
//! use fncore::retry::{RetryPolicy, retry};
//!
//! let calls = Cell::new(0);
//! let flaky = retry(RetryPolicy::new(3, Duration::ZERO), |name: &&str| {
//!     calls.set(calls.get() + 1);
//!     assert!(calls.get() >= 2, "not ready");
//!     format!("hello, {name}")
//! });
//!
//! assert_eq!(flaky(&"ada"), Outcome::success("hello, ada".to_string()));
//! assert_eq!(calls.get(), 2);
//! ```

use std::thread;
use std::time::Duration;

use crate::control::Outcome;

/// How many times to attempt a call and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts. Zero is treated as one.
    pub attempts: u32,
    /// Pause between two consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and delay.
    #[must_use]
    pub const fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Returns a copy with `attempts` changed.
    #[must_use]
    pub const fn with_attempts(self, attempts: u32) -> Self {
        Self { attempts, ..self }
    }

    /// Returns a copy with `delay` changed.
    #[must_use]
    pub const fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    const fn effective_attempts(&self) -> u32 {
        if self.attempts == 0 { 1 } else { self.attempts }
    }
}

/// Three attempts, 10 ms apart.
impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(10))
    }
}

/// Wraps `function` so that each call is retried according to `policy`.
///
/// The first successful attempt is returned immediately. When every attempt
/// fails, the last failure is returned with the context
/// `"gave up after {n} attempts"`; the original failure stays reachable as
/// its cause.
pub fn retry<A, B, F>(policy: RetryPolicy, function: F) -> impl Fn(&A) -> Outcome<B>
where
    F: Fn(&A) -> B,
{
    move |argument| {
        let attempts = policy.effective_attempts();
        let mut last = Outcome::Empty;
        for attempt in 1..=attempts {
            match Outcome::of(|| function(argument)) {
                Outcome::Success(value) => return Outcome::Success(value),
                outcome => {
                    if let Outcome::Failure(failure) = &outcome {
                        tracing::debug!(attempt, attempts, error = %failure, "attempt failed");
                    }
                    last = outcome;
                }
            }
            if attempt < attempts {
                thread::sleep(policy.delay);
            }
        }
        tracing::warn!(attempts, "giving up");
        last.map_failure(format!("gave up after {attempts} attempts"))
    }
}

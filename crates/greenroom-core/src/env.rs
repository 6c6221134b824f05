//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples the screen driver from system time.
//! The controller itself never touches it (it only emits delays as data);
//! the driver uses it to run the deferred-exit timer, and tests substitute
//! an immediate implementation so deferred transitions fire synchronously.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Isolation: implementations must not share global state

use std::time::{Duration, Instant};

/// Abstract environment providing time and async sleeping.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Returns the current time.
    ///
    /// Subsequent calls must return times >= previous calls within a single
    /// execution context.
    fn now(&self) -> Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the only async method in the trait and is only used by driver
    /// code, never by the controller.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

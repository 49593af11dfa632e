//! Clock trait and implementations
//!
//! The VM never reads the system time directly. It asks a [`Clock`] for the
//! time elapsed since the clock was created, which lets the host swap in a
//! deterministic clock for tests and benchmarks.

use std::{cell::Cell, time::Duration, time::Instant};

/// Source of elapsed time for the run budget
///
/// # Example Implementation
///
/// ```rust
/// use std::time::Duration;
/// use tapevm_runtime::clock::Clock;
///
/// /// A clock that never advances, so a run can only complete or fault
/// struct FrozenClock;
///
/// impl Clock for FrozenClock {
///     fn elapsed(&self) -> Duration {
///         Duration::ZERO
///     }
/// }
/// ```
pub trait Clock {
    /// Time elapsed since the clock was created
    ///
    /// Must be monotonic: a later call never returns less than an earlier one.
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
///
/// Measures total elapsed time, not just the sub-second component.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances a fixed step on every reading
///
/// The first reading returns zero, the n-th returns `(n - 1) * step`. This
/// is useful for:
/// - Pinning exactly which instruction a timeout fires before
/// - Tests that must not depend on machine speed
#[derive(Debug)]
pub struct SteppingClock {
    step: Duration,
    now: Cell<Duration>,
}

impl SteppingClock {
    /// Creates a clock advancing `step` per reading
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            now: Cell::new(Duration::ZERO),
        }
    }

    /// Creates a clock advancing one millisecond per reading
    pub fn per_millisecond() -> Self {
        Self::new(Duration::from_millis(1))
    }
}

impl Clock for SteppingClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now.saturating_add(self.step));
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

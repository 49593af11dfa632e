//! Per-run execution context
//!
//! The context holds everything a single run is allowed to consume: the time
//! budget, the clock it is measured with, the queued input characters and the
//! debug flag. One context is created per run and dropped with it.

use crate::{
    clock::{Clock, MonotonicClock},
    error::{Result, TapeVmError},
};
use std::{collections::VecDeque, time::Duration};

/// Execution context for one program run
pub struct RunContext<C: Clock = MonotonicClock> {
    // === Time Budget ===
    /// Time allowed for the run
    timeout: Duration,

    /// Clock reading taken when the run started, set by [`RunContext::start`]
    started_at: Duration,

    /// Clock the budget is measured with
    clock: C,

    // === Program Input ===
    /// Characters not yet consumed by `,`
    input: VecDeque<char>,

    // === Debug and Logging ===
    /// Debug mode (logs each fault and the final counters)
    pub debug_mode: bool,
}

impl RunContext<MonotonicClock> {
    /// Creates a context measured with the wall clock
    ///
    /// # Arguments
    /// * `timeout_ms` - Time budget in milliseconds, must be positive
    pub fn new(timeout_ms: u64) -> Result<Self> {
        Self::with_clock(timeout_ms, MonotonicClock::new())
    }
}

impl<C: Clock> RunContext<C> {
    /// Creates a context measured with the given clock
    ///
    /// The clock is not read until [`RunContext::start`].
    ///
    /// # Errors
    /// Returns [`TapeVmError::InvalidTimeout`] for a zero budget.
    pub fn with_clock(timeout_ms: u64, clock: C) -> Result<Self> {
        if timeout_ms == 0 {
            return Err(TapeVmError::InvalidTimeout(timeout_ms));
        }

        Ok(Self {
            timeout: Duration::from_millis(timeout_ms),
            started_at: Duration::ZERO,
            clock,
            input: VecDeque::new(),
            debug_mode: false,
        })
    }

    /// Mark the start of the run
    ///
    /// Time spent between creating the context and starting it is not
    /// charged to the budget.
    pub fn start(&mut self) {
        self.started_at = self.clock.elapsed();
    }

    /// Queue characters for the `,` instruction
    pub fn push_input(&mut self, text: &str) {
        self.input.extend(text.chars());
    }

    /// Take the next input character, if any
    pub fn read_input(&mut self) -> Option<char> {
        self.input.pop_front()
    }

    /// Enable debug mode
    pub fn enable_debug(&mut self) {
        self.debug_mode = true;
    }

    /// Get the time budget
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// Time elapsed since the run started
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed().saturating_sub(self.started_at)
    }

    /// Whether the budget is used up
    ///
    /// Reads the clock once.
    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;

    #[test]
    fn test_run_context_creation() {
        let mut context = RunContext::new(1_000).unwrap();
        context.start();
        assert_eq!(context.get_timeout(), Duration::from_millis(1_000));
        assert!(!context.debug_mode);
        assert!(!context.is_expired());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = RunContext::new(0);
        assert!(matches!(result, Err(TapeVmError::InvalidTimeout(0))));
    }

    #[test]
    fn test_expiry_with_stepping_clock() {
        // Reading 0 is the start, then 1ms, 2ms, 3ms...
        let mut context = RunContext::with_clock(3, SteppingClock::per_millisecond()).unwrap();
        context.start();

        assert!(!context.is_expired()); // 1ms
        assert!(!context.is_expired()); // 2ms
        assert!(context.is_expired()); // 3ms
    }

    #[test]
    fn test_budget_starts_at_start() {
        let clock = SteppingClock::new(Duration::from_millis(10));
        let mut context = RunContext::with_clock(15, &clock).unwrap();

        // Readings before start() are not charged
        clock.elapsed();
        clock.elapsed();
        clock.elapsed();

        context.start(); // 30ms
        assert!(!context.is_expired()); // 40ms, 10ms into the run
        assert!(context.is_expired()); // 50ms, 20ms into the run
    }

    #[test]
    fn test_input_queue() {
        let mut context = RunContext::new(100).unwrap();
        context.push_input("hé");

        assert_eq!(context.read_input(), Some('h'));
        assert_eq!(context.read_input(), Some('é'));
        assert_eq!(context.read_input(), None);
    }

    #[test]
    fn test_debug_mode() {
        let mut context = RunContext::new(100).unwrap();
        context.enable_debug();
        assert!(context.debug_mode);
    }
}

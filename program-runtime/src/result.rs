//! Run results and their one-line rendering

use crate::error::ProgramError;
use std::{fmt, time::Duration};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The instruction pointer ran past the end of the program
    Completed,
    /// The time budget ran out first
    TimedOut,
    /// The program faulted
    Faulted(ProgramError),
}

impl RunStatus {
    /// Tag used at the start of the rendered line
    pub fn tag(&self) -> &'static str {
        match self {
            RunStatus::Completed => "RESULT",
            RunStatus::TimedOut => "KILLED",
            RunStatus::Faulted(_) => "ERROR",
        }
    }
}

/// Immutable record of one finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    status: RunStatus,
    tape: Vec<i64>,
    output: String,
    instructions_executed: u64,
    elapsed: Duration,
}

impl RunResult {
    pub(crate) fn new(
        status: RunStatus,
        tape: Vec<i64>,
        output: String,
        instructions_executed: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            tape,
            output,
            instructions_executed,
            elapsed,
        }
    }

    /// How the run ended
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    /// Tape cells from 0 up to and including the high-water mark
    pub fn tape(&self) -> &[i64] {
        &self.tape
    }

    /// Text produced by `.`
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Instructions dispatched before the run ended
    pub fn instructions_executed(&self) -> u64 {
        self.instructions_executed
    }

    /// Time the run took, as measured by its clock
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Shorthand for a `Completed` status
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Shorthand for a `TimedOut` status
    pub fn is_timed_out(&self) -> bool {
        self.status == RunStatus::TimedOut
    }

    /// The fault, if the run faulted
    pub fn fault(&self) -> Option<&ProgramError> {
        match &self.status {
            RunStatus::Faulted(err) => Some(err),
            _ => None,
        }
    }
}

/// Renders `"<TAG> | [c0, c1, ...] <output>"`. Faulted runs append the
/// fault in parentheses, dropping the output separator when there is no
/// output.
impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {:?}", self.status.tag(), self.tape)?;
        match &self.status {
            RunStatus::Faulted(err) if self.output.is_empty() => write!(f, " ({})", err),
            RunStatus::Faulted(err) => write!(f, " {} ({})", self.output, err),
            _ => write!(f, " {}", self.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: RunStatus, tape: Vec<i64>, output: &str) -> RunResult {
        RunResult::new(status, tape, output.to_string(), 0, Duration::ZERO)
    }

    #[test]
    fn test_render_completed() {
        let rendered = result(RunStatus::Completed, vec![0, 64], "@").to_string();
        assert_eq!(rendered, "RESULT | [0, 64] @");
    }

    #[test]
    fn test_render_killed() {
        let rendered = result(RunStatus::TimedOut, vec![3], "").to_string();
        assert_eq!(rendered, "KILLED | [3] ");
    }

    #[test]
    fn test_render_faulted() {
        let status = RunStatus::Faulted(ProgramError::UnmatchedLoopEnd { position: 2 });
        let rendered = result(status, vec![-1], "").to_string();
        assert_eq!(rendered, "ERROR | [-1] (unmatched ']' at position 2)");
    }

    #[test]
    fn test_render_faulted_with_output() {
        let status = RunStatus::Faulted(ProgramError::UnmatchedLoopEnd { position: 3 });
        let rendered = result(status, vec![33], "!").to_string();
        assert_eq!(rendered, "ERROR | [33] ! (unmatched ']' at position 3)");
    }

    #[test]
    fn test_fault_accessor() {
        let err = ProgramError::InvalidCharacter { position: 0, value: -1 };
        let faulted = result(RunStatus::Faulted(err.clone()), vec![-1], "");
        assert_eq!(faulted.fault(), Some(&err));
        assert!(!faulted.is_completed());
        assert!(!faulted.is_timed_out());
    }
}

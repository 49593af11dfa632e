//! Error types for the tape VM

use thiserror::Error;

/// Result type for tape VM operations
pub type Result<T> = std::result::Result<T, TapeVmError>;

/// Errors raised by the host side of a run (configuration, loading)
///
/// Untrusted program text never produces one of these; program faults are
/// reported through [`ProgramError`] inside the run result instead.
#[derive(Debug, Error)]
pub enum TapeVmError {
    /// Timeout budget must be a positive number of milliseconds
    #[error("Invalid timeout: {0} ms (must be greater than zero)")]
    InvalidTimeout(u64),

    /// Loop depth limit is outside the accepted range
    #[error("Invalid maximum loop depth {depth} (must be between 1 and {max})")]
    InvalidLoopDepth {
        /// The rejected depth
        depth: usize,
        /// Largest accepted depth
        max: usize,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration {path}: {source}")]
    ConfigIo {
        /// Path of the configuration file
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

/// Faults caused by the program being executed
///
/// A fault stops the run; the tape and output produced up to that point are
/// still returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// A `]` was reached with no open loop
    #[error("unmatched ']' at position {position}")]
    UnmatchedLoopEnd {
        /// Instruction position of the `]`
        position: usize,
    },

    /// Loop nesting went deeper than the configured maximum
    #[error("loop nesting deeper than {max_depth} at position {position}")]
    LoopStackOverflow {
        /// Instruction position of the `[` that overflowed
        position: usize,
        /// Configured maximum depth
        max_depth: usize,
    },

    /// The data pointer moved past the right end of the tape
    #[error("data pointer moved past cell {last} at position {position}")]
    PointerOutOfBounds {
        /// Instruction position of the `>`
        position: usize,
        /// Index of the last tape cell
        last: usize,
    },

    /// A cell value left the signed 64-bit range
    #[error("cell {cell} overflowed at position {position}")]
    CellOverflow {
        /// Instruction position of the `+` or `-`
        position: usize,
        /// Tape index of the cell
        cell: usize,
    },

    /// `.` on a value that is not a character code
    #[error("cell value {value} is not a valid character at position {position}")]
    InvalidCharacter {
        /// Instruction position of the `.`
        position: usize,
        /// The offending cell value
        value: i64,
    },

    /// `.` would produce more characters than the configured limit
    #[error("output limit of {limit} characters reached at position {position}")]
    OutputLimitExceeded {
        /// Instruction position of the `.`
        position: usize,
        /// Configured limit
        limit: usize,
    },
}

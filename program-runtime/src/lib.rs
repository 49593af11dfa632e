//! Tapevm Runtime
//!
//! This crate provides a sandboxed interpreter for the eight-instruction tape
//! language (`+ - > < [ ] . ,`). Programs arrive as untrusted text from a chat
//! command; each run either completes, is killed when its time budget runs
//! out, or stops on a program fault. In every case the caller gets back the
//! tape and output produced so far.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Host (chat command)            │
//! │   (argument splitting, reply target)    │
//! └────────────────┬────────────────────────┘
//!                  │
//!                  │ source + timeout (ms)
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │    tapevm-runtime (this crate)          │
//! │  ┌─────────────────────────────────┐    │
//! │  │    Program                      │    │
//! │  │  - one Instruction per char     │    │
//! │  │  - bracket diagnostics          │    │
//! │  └─────────────────────────────────┘    │
//! │  ┌─────────────────────────────────┐    │
//! │  │    TapeVm                       │    │
//! │  │  - tape, pointers, loop stack   │    │
//! │  │  - RunContext (time budget)     │    │
//! │  └─────────────────────────────────┘    │
//! └────────────────┬────────────────────────┘
//!                  │
//!                  ▼
//!          RunResult ("RESULT | [..] text")
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tapevm_runtime::{RunContext, TapeVm, clock::SteppingClock};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Wall clock budget of 500ms
//!     let result = tapevm_runtime::run("+++.", 500)?;
//!     assert_eq!(result.tape(), &[3]);
//!
//!     // Deterministic clock: one millisecond per budget check
//!     let context = RunContext::with_clock(2, SteppingClock::per_millisecond())?;
//!     let result = TapeVm::with_context("+[]", context).run();
//!     assert!(result.is_timed_out());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(clippy::arithmetic_side_effects)]

pub mod clock;
pub mod config;
pub mod error;
pub mod program;
pub mod result;
pub mod run_context;
pub mod vm;

// Re-export main types
pub use config::VmConfig;
pub use error::{ProgramError, Result, TapeVmError};
pub use program::{Diagnostics, Instruction, Program};
pub use result::{RunResult, RunStatus};
pub use run_context::RunContext;
pub use vm::{run, TapeVm};

//! Tapevm Commands
//!
//! This crate adapts the tape VM to a chat bot's command system. The host
//! owns command registration, permission checks and message delivery; this
//! crate turns the raw arguments of a `bf` invocation into exactly one reply
//! and tells the host where to send it.
//!
//! # Available Commands
//!
//! - `bf <program>` - Run a program with the configured time budget
//!   (permission `brainfuck.exec`, granted by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use tapevm_commands::{BfCommand, Origin, DEFAULT_CONFIG_PATH};
//!
//! let command = BfCommand::setup(DEFAULT_CONFIG_PATH).unwrap();
//! let origin = Origin::Channel {
//!     channel: "#tapevm".to_string(),
//!     caller: "alice".to_string(),
//! };
//!
//! let reply = command.handle("++++++++[>++++++++<-]>.", &origin);
//! assert_eq!(reply.text, "RESULT | [0, 64] @");
//! ```

#![warn(missing_docs)]
#![deny(clippy::arithmetic_side_effects)]

pub mod bf;

pub use bf::{BfCommand, CommandError, Origin, Reply, Target};

/// Command identifiers
///
/// These constants define the names the host registers commands under.
pub mod command_names {
    /// Run a tape program
    pub const BF: &str = "bf";
}

/// Permission identifiers
pub mod permissions {
    /// Required to run `bf`
    pub const BF_EXEC: &str = "brainfuck.exec";

    /// Whether `bf` is allowed for users with no explicit grant
    pub const BF_EXEC_DEFAULT: bool = true;
}

/// Default location of the command's config file
pub const DEFAULT_CONFIG_PATH: &str = "config/plugins/brainfuck.yml";

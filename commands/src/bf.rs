//! The `bf` command
//!
//! Runs the first argument as a tape program and replies with the rendered
//! result. Replies go to the channel when the command was issued in one, and
//! to the caller otherwise.

use std::path::{Path, PathBuf};
use tapevm_runtime::{TapeVm, TapeVmError, VmConfig};
use thiserror::Error as ThisError;

/// Command error types
#[derive(Debug, ThisError)]
pub enum CommandError {
    /// No program was given
    #[error("Usage: {prefix}bf <brainfuck program>")]
    MissingProgram {
        /// The host's command prefix
        prefix: String,
    },
    /// Configuration could not be loaded or used
    #[error(transparent)]
    Config(#[from] TapeVmError),
}

/// Where a command invocation came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Issued in a shared channel
    Channel {
        /// Channel name
        channel: String,
        /// Nickname of the user who issued it
        caller: String,
    },
    /// Issued in a private message
    Private {
        /// Nickname of the user who issued it
        caller: String,
    },
}

/// Where a reply should be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Broadcast to a channel
    Channel(String),
    /// Send privately to a user
    Caller(String),
}

/// One line for the host to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Delivery target
    pub target: Target,
    /// Message text
    pub text: String,
}

/// The `bf` command handler
#[derive(Debug, Clone)]
pub struct BfCommand {
    config: VmConfig,
    config_path: Option<PathBuf>,
    prefix: String,
}

impl BfCommand {
    /// Default command prefix shown in the usage line
    pub const DEFAULT_PREFIX: &'static str = ".";

    /// Creates a handler around an already loaded config
    pub fn new(config: VmConfig) -> Self {
        Self {
            config,
            config_path: None,
            prefix: Self::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Loads the config file and creates a handler
    ///
    /// A missing or invalid file is logged and returned as an error; the host
    /// should leave the command disabled in that case.
    pub fn setup(path: impl AsRef<Path>) -> Result<Self, CommandError> {
        let path = path.as_ref();
        let config = VmConfig::load(path).map_err(|e| {
            log::error!("Error loading configuration {}: {}", path.display(), e);
            log::error!("Disabling..");
            e
        })?;

        let mut command = Self::new(config);
        command.config_path = Some(path.to_path_buf());
        Ok(command)
    }

    /// Set the command prefix shown in the usage line
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Current time budget in milliseconds
    pub fn timeout(&self) -> u64 {
        self.config.timeout
    }

    /// Re-read the config file this handler was set up from
    ///
    /// Returns `false` and keeps the previous config if reading fails or the
    /// handler was not created from a file. Runs already in flight keep the
    /// budget they started with.
    pub fn reload(&mut self) -> bool {
        let Some(path) = &self.config_path else {
            log::warn!("No configuration file to reload");
            return false;
        };

        match VmConfig::load(path) {
            Ok(config) => {
                self.config = config;
                true
            }
            Err(e) => {
                log::error!("Error reloading configuration: {}", e);
                false
            }
        }
    }

    /// Handle one invocation
    ///
    /// `raw_args` is everything after the command name. Only the first
    /// whitespace-separated token is run.
    pub fn handle(&self, raw_args: &str, origin: &Origin) -> Reply {
        let text = match self.execute(raw_args) {
            Ok(text) => text,
            Err(e @ CommandError::MissingProgram { .. }) => {
                // Usage help always goes to the caller
                return Reply {
                    target: Target::Caller(caller_of(origin).to_string()),
                    text: e.to_string(),
                };
            }
            Err(e) => {
                log::error!("bf command failed: {}", e);
                format!("ERROR | {}", e)
            }
        };

        Reply {
            target: target_for(origin),
            text,
        }
    }

    fn execute(&self, raw_args: &str) -> Result<String, CommandError> {
        let code = raw_args
            .split_whitespace()
            .next()
            .ok_or_else(|| CommandError::MissingProgram {
                prefix: self.prefix.clone(),
            })?;

        let result = TapeVm::from_config(code, &self.config)?.run();
        if let Some(fault) = result.fault() {
            log::warn!("Program faulted: {}", fault);
        }
        Ok(result.to_string())
    }
}

fn caller_of(origin: &Origin) -> &str {
    match origin {
        Origin::Channel { caller, .. } | Origin::Private { caller } => caller,
    }
}

fn target_for(origin: &Origin) -> Target {
    match origin {
        Origin::Channel { channel, .. } => Target::Channel(channel.clone()),
        Origin::Private { caller } => Target::Caller(caller.clone()),
    }
}

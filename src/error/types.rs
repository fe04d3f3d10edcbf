//! Custom error types with exit codes

use std::io;
use thiserror::Error;

/// Main error type for cmdrunner operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RunnerError {
    /// Usage Error - nothing to dispatch
    #[error("No command arguments provided")]
    Usage,

    /// Unknown Command - name matches neither a command nor a group
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Unknown Group Member - a group expands to a command that is not registered
    #[error("Unknown command: {member} (member of group {group})")]
    UnknownGroupMember { group: String, member: String },

    /// Command Failure - a command returned a non-zero exit code
    #[error("Command {name} failed with exit code {code}")]
    CommandFailed { name: String, code: i32 },

    /// Command Fault - a command raised an error
    #[error("Command {name} failed: {message}")]
    CommandFault { name: String, message: String },

    /// Cancelled - the cancellation token fired before a command started
    #[error("Cancelled before command {name} started")]
    Cancelled { name: String },

    /// Registration Error - invalid or conflicting command/group registration
    #[error("Registration error: {message}")]
    Registration { message: String },

    /// Configuration Error - missing or invalid runner configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output stream could not be written
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl RunnerError {
    /// Get the process exit code for this error
    ///
    /// A command's own non-zero exit code is propagated verbatim; every other
    /// failure maps to 1.
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::CommandFailed { code, .. } => code,
            Self::Usage
            | Self::UnknownCommand { .. }
            | Self::UnknownGroupMember { .. }
            | Self::CommandFault { .. }
            | Self::Cancelled { .. }
            | Self::Registration { .. }
            | Self::Configuration { .. }
            | Self::Io(_) => 1,
        }
    }

    /// Create an unknown command error
    #[inline]
    pub fn unknown_command<S: Into<String>>(name: S) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Create a registration error
    #[inline]
    pub fn registration<S: Into<String>>(message: S) -> Self {
        Self::Registration {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

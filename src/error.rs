#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MicmdError>;

/// Failure raised by a command handler during `invoke`.
///
/// Handlers report failure through this type only; a failed invocation never
/// smuggles a sentinel through the result mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvocationError {
    message: String,
}

impl InvocationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum MicmdError {
    #[error("command already registered: {name}")]
    DuplicateCommand { name: String },

    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),

    #[error("Undefined MI command: {name}{}", suggestion_suffix(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },

    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("{0}")]
    Invocation(#[from] InvocationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MicmdError {
    /// Registration, IO and configuration failures are fatal; everything else
    /// is reported to the controller as an `^error` record and the command
    /// loop keeps running.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. } | Self::MalformedRequest { .. } | Self::Invocation(_)
        )
    }

    /// Returns the process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::DuplicateCommand { .. } | Self::InvalidCommandName(_) => 3,
            Self::UnknownCommand { .. } => 4,
            Self::MalformedRequest { .. } => 5,
            Self::Invocation(_) => 6,
            Self::Io(_) => 7,
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_deref()
        .map(|name| format!(" (closest match: {name})"))
        .unwrap_or_default()
}

//! Error types for the Feyndraw CLI.

use std::{io, ops::Range};

use thiserror::Error;

use feyndraw::EditError;

use crate::config::ConfigError;

/// Everything that can stop a replay
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session script is malformed. Carries the script text so the
    /// offending part can be shown.
    #[error("Invalid script: {message}")]
    Script {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    /// Building the initial diagram failed.
    #[error("Invalid diagram: {0}")]
    Edit(#[from] EditError),

    /// Replaying one of the script events failed.
    #[error("Event #{index} ({action}) failed: {source}")]
    Event {
        index: usize,
        action: &'static str,
        source: EditError,
    },
}

impl CliError {
    pub fn script(message: impl Into<String>, src: &str, span: Option<Range<usize>>) -> Self {
        Self::Script {
            message: message.into(),
            src: src.to_string(),
            span,
        }
    }
}

//! Player supervisor errors.

use std::path::PathBuf;

/// Errors that can occur while configuring or starting the player.
///
/// Stopping never fails: a player that ignores the termination request is
/// killed, and cleanup problems during teardown are only logged.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Invalid player configuration: {message}")]
    Configuration { message: String },

    #[error("Failed to launch player '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write title overlay {path}: {source}")]
    Overlay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlayerError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

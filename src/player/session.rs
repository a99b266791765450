//! Playback session record and shared types.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use chrono::{DateTime, Local};

/// Lifecycle state of the supervised player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been started yet
    Idle,
    /// Process is being launched
    Starting,
    /// Process launched and not yet stopped
    Playing,
    /// Termination requested, waiting for exit
    Stopping,
    /// Process gone, handle released
    Stopped,
}

impl SessionState {
    /// Whether a player handle is held in this state.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Playing | Self::Stopping)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Starting => "Starting",
            Self::Playing => "Playing",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
        };
        f.write_str(name)
    }
}

/// Whether the player repeats the media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once
    Once,
    /// Repeat until stopped
    Forever,
    /// Use the media's own repeat count; negative means forever
    Repeats(i32),
}

impl LoopMode {
    /// Resolve an explicit loop request, falling back to a repeat count.
    pub fn resolve(explicit: Option<bool>, repeats: i32) -> Self {
        match explicit {
            Some(true) => Self::Forever,
            Some(false) => Self::Once,
            None => Self::Repeats(repeats),
        }
    }

    /// Whether the player must be told to loop forever.
    pub fn is_forever(self) -> bool {
        match self {
            Self::Once => false,
            Self::Forever => true,
            Self::Repeats(count) => count <= -1,
        }
    }
}

/// The media currently (or last) handed to the player.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Current lifecycle state
    pub state: SessionState,
    /// File passed as the final positional argument
    pub media_path: PathBuf,
    /// Whether the loop flag was passed
    pub loop_requested: bool,
    /// Title rendered through the overlay file
    pub overlay_text: Option<String>,
    /// Overlay file passed to the player, if any
    pub overlay_path: Option<PathBuf>,
    /// Full argument vector, excluding the program
    pub args: Vec<OsString>,
    /// When the player was launched
    pub started_at: DateTime<Local>,
    /// Whether the process is currently suspended
    pub paused: bool,
    /// Exit status, once observed
    pub exit_status: Option<ExitStatus>,
}

impl PlaybackSession {
    pub(crate) fn starting(
        media_path: &Path,
        loop_requested: bool,
        overlay_text: Option<String>,
        overlay_path: Option<PathBuf>,
        args: Vec<OsString>,
    ) -> Self {
        Self {
            state: SessionState::Starting,
            media_path: media_path.to_path_buf(),
            loop_requested,
            overlay_text,
            overlay_path,
            args,
            started_at: Local::now(),
            paused: false,
            exit_status: None,
        }
    }

    /// File name of the media, for display.
    pub fn display_name(&self) -> String {
        self.media_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.media_path.display().to_string())
    }

    /// Time since launch, in whole seconds.
    pub fn elapsed_secs(&self) -> i64 {
        (Local::now() - self.started_at).num_seconds().max(0)
    }
}

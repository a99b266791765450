//! Interactive text commands.
//!
//! One line of input maps to one [`ConsoleCommand`]. The [`Console`] runs
//! commands against a shared supervisor and writes human-readable replies
//! to any writer.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error};

use crate::media::{self, MediaFile};
use crate::player::{lock, SessionState, SharedSupervisor};

/// Help text listing every command.
pub const HELP: &str = "Available commands: list, play <file>, loop <file>, pause, stop, state, help, quit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Print playable files
    List,
    /// Play a file from the media directory
    Play { file: String, looping: bool },
    /// Pause or resume
    Pause,
    /// Stop playback
    Stop,
    /// Print what is playing
    State,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}")]
    Unknown(String),
}

impl ConsoleCommand {
    /// Parse one line. Blank lines yield `Ok(None)`.
    ///
    /// Everything after the first space is the file name, so names may
    /// contain spaces.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, rest.is_empty()) {
            ("list", true) => Self::List,
            ("pause", true) => Self::Pause,
            ("stop", true) => Self::Stop,
            ("state", true) => Self::State,
            ("help", true) => Self::Help,
            ("quit" | "exit", true) => Self::Quit,
            ("play", false) => Self::Play {
                file: rest.to_string(),
                looping: false,
            },
            ("loop", false) => Self::Play {
                file: rest.to_string(),
                looping: true,
            },
            ("play", true) => return Err(ParseError::Usage("play <file>")),
            ("loop", true) => return Err(ParseError::Usage("loop <file>")),
            _ => return Err(ParseError::Unknown(line.to_string())),
        };
        Ok(Some(command))
    }
}

/// Whether the console should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes console commands against a shared supervisor.
pub struct Console {
    supervisor: SharedSupervisor,
    directory: PathBuf,
    stop_timeout: Duration,
}

impl Console {
    pub fn new(supervisor: SharedSupervisor, directory: PathBuf, stop_timeout: Duration) -> Self {
        Self {
            supervisor,
            directory,
            stop_timeout,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Parse and run one line of input.
    pub fn handle_line(&self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        match ConsoleCommand::parse(line) {
            Ok(Some(command)) => self.execute(&command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(ParseError::Unknown(input)) => {
                debug!(%input, "unknown console command");
                writeln!(out, "Unknown command")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                writeln!(out, "{}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run a parsed command.
    pub fn execute(&self, command: &ConsoleCommand, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            ConsoleCommand::List => self.list(out)?,
            ConsoleCommand::Play { file, looping } => self.play(file, *looping, out)?,
            ConsoleCommand::Pause => match lock(&self.supervisor).toggle_pause() {
                Some(true) => writeln!(out, "Paused playback")?,
                Some(false) => writeln!(out, "Resumed playback")?,
                None => writeln!(out, "Nothing is playing")?,
            },
            ConsoleCommand::Stop => {
                let mut supervisor = lock(&self.supervisor);
                if supervisor.is_playing() {
                    supervisor.stop(self.stop_timeout);
                    writeln!(out, "Stopped playback")?;
                } else {
                    supervisor.reap();
                    writeln!(out, "Nothing is playing")?;
                }
            }
            ConsoleCommand::State => writeln!(out, "{}", self.describe_state())?,
            ConsoleCommand::Help => writeln!(out, "{}", HELP)?,
            ConsoleCommand::Quit => {
                lock(&self.supervisor).stop(self.stop_timeout);
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn list(&self, out: &mut impl Write) -> io::Result<()> {
        match media::list_media(&self.directory) {
            Ok(files) if files.is_empty() => {
                writeln!(out, "No media files found in {}", self.directory.display())
            }
            Ok(files) => {
                for file in files {
                    if let Some(name) = file.file_name() {
                        writeln!(out, "{}", name.to_string_lossy())?;
                    }
                }
                Ok(())
            }
            Err(e) => writeln!(out, "Cannot list {}: {}", self.directory.display(), e),
        }
    }

    /// Play `name` from the media directory.
    pub fn play(&self, name: &str, looping: bool, out: &mut impl Write) -> io::Result<()> {
        let path = self.directory.join(name);
        if !path.is_file() {
            return writeln!(out, "File not found: {}", name);
        }
        if !media::is_supported(&path) {
            return writeln!(out, "Unsupported file type: {}", name);
        }

        let media = MediaFile::new(path);
        match lock(&self.supervisor).play(&media, Some(looping)) {
            Ok(()) if looping => writeln!(out, "Looping: {}", name),
            Ok(()) => writeln!(out, "Playing: {}", name),
            Err(e) => {
                error!(file = name, error = %e, "playback failed");
                writeln!(out, "Failed to play {}: {}", name, e)
            }
        }
    }

    /// Start a randomly chosen file, if the directory has any.
    pub fn autoplay(&self, out: &mut impl Write) -> io::Result<()> {
        let files = match media::list_media(&self.directory) {
            Ok(files) => files,
            Err(e) => return writeln!(out, "Cannot list {}: {}", self.directory.display(), e),
        };
        let Some(name) = media::pick_startup(&files).and_then(|path| path.file_name()) else {
            return writeln!(out, "No media files found to play.");
        };
        let name = name.to_string_lossy().into_owned();
        self.play(&name, false, out)
    }

    /// One-line summary of the current session.
    pub fn describe_state(&self) -> String {
        let mut supervisor = lock(&self.supervisor);
        supervisor.reap();
        let paused = supervisor.is_paused();
        let state = supervisor.state();

        match supervisor.session() {
            Some(session) if state == SessionState::Playing => format!(
                "State: {}, File: {}, Elapsed: {}",
                if paused { "Paused" } else { "Playing" },
                session.display_name(),
                format_hms(session.elapsed_secs())
            ),
            _ => format!("State: {}, File: No file, Elapsed: {}", state, format_hms(0)),
        }
    }
}

/// Format seconds as `HH:MM:SS`.
pub fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

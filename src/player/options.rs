//! Options controlling how the external player is invoked.

use std::ffi::OsString;
use std::path::Path;

use super::error::PlayerError;

/// Default player binary.
pub const DEFAULT_PROGRAM: &str = "vlc";

/// Flag that makes VLC repeat the media forever.
pub const DEFAULT_LOOP_FLAG: &str = "--loop";

/// Flag that makes VLC load a subtitle file.
pub const DEFAULT_OVERLAY_FLAG: &str = "--sub-file";

/// How the player process is launched.
///
/// Validated by [`PlayerOptions::validate`] before the supervisor accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Player binary, looked up in `PATH` when not absolute
    pub program: String,
    /// Arguments passed through verbatim before anything else
    pub args: Vec<String>,
    /// Flag appended when the media should loop forever
    pub loop_flag: String,
    /// Flag that precedes the overlay file path
    pub overlay_flag: String,
    /// Whether titles are rendered as a transient overlay
    pub show_titles: bool,
    /// How long a title stays on screen, in seconds
    pub title_duration: Option<i64>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: Vec::new(),
            loop_flag: DEFAULT_LOOP_FLAG.to_string(),
            overlay_flag: DEFAULT_OVERLAY_FLAG.to_string(),
            show_titles: false,
            title_duration: None,
        }
    }
}

impl PlayerOptions {
    /// Check that the options describe a launchable player.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.program.trim().is_empty() {
            return Err(PlayerError::configuration("player program must not be empty"));
        }

        if self.show_titles {
            match self.title_duration {
                None => {
                    return Err(PlayerError::configuration(
                        "title_duration is required when show_titles is enabled",
                    ))
                }
                Some(secs) if secs <= 0 => {
                    return Err(PlayerError::configuration(format!(
                        "title_duration must be positive, got {}",
                        secs
                    )))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Header line of the overlay file, if titles are enabled.
    pub(crate) fn overlay_header(&self) -> Option<String> {
        match (self.show_titles, self.title_duration) {
            (true, Some(secs)) if secs > 0 => Some(format!("{}\n", secs)),
            _ => None,
        }
    }

    /// Assemble the argument vector for one launch.
    ///
    /// Order: passthrough args, loop flag, overlay flag and path, media path last.
    pub fn command_args(
        &self,
        media_path: &Path,
        loop_forever: bool,
        overlay_path: Option<&Path>,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();

        if loop_forever {
            args.push(OsString::from(&self.loop_flag));
        }

        if let Some(path) = overlay_path {
            args.push(OsString::from(&self.overlay_flag));
            args.push(path.as_os_str().to_os_string());
        }

        args.push(media_path.as_os_str().to_os_string());
        args
    }
}

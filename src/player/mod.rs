//! External player supervision
//!
//! Launches the media player as a child process and owns it for its whole
//! life:
//!
//! - `options`: how the player is invoked and validated
//! - `session`: the record of what is (or was) playing
//! - `overlay`: transient title files in a private temp directory
//! - `process`: the child process and the signals sent to it
//! - `supervisor`: start/stop/query lifecycle, one player at a time
//! - `monitor`: background thread reaping players that finished on their own
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use video_looper::player::{LoopMode, PlaybackSupervisor, PlayerOptions};
//!
//! let mut supervisor = PlaybackSupervisor::with_options(PlayerOptions::default()).unwrap();
//! supervisor
//!     .start(Path::new("/home/pi/video/clip.mp4"), LoopMode::Forever, None)
//!     .unwrap();
//! assert!(supervisor.is_playing());
//! supervisor.stop(Duration::from_secs(3));
//! ```

mod error;
pub mod monitor;
mod options;
mod overlay;
mod process;
mod session;
mod supervisor;

pub use error::PlayerError;
pub use monitor::{lock, PlaybackMonitor, SharedSupervisor};
pub use options::{PlayerOptions, DEFAULT_LOOP_FLAG, DEFAULT_OVERLAY_FLAG, DEFAULT_PROGRAM};
pub use overlay::OVERLAY_FILE_NAME;
pub use session::{LoopMode, PlaybackSession, SessionState};
pub use supervisor::{PlaybackSupervisor, RESTART_STOP_TIMEOUT, TERMINATE_GRACE};

//! Lifecycle supervisor for the external player process.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::error::PlayerError;
use super::options::PlayerOptions;
use super::overlay::OverlayStore;
use super::process::PlayerProcess;
use super::session::{LoopMode, PlaybackSession, SessionState};
use crate::media::{MediaFile, SUPPORTED_EXTENSIONS};

/// How long `start` waits for a previous player to go away.
pub const RESTART_STOP_TIMEOUT: Duration = Duration::from_secs(3);

/// Time a player gets to act on the termination request before it is killed.
///
/// Independent of the caller's timeout, so `stop(Duration::ZERO)` still lets
/// the player run its own shutdown.
pub const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// Sleep between exit polls while stopping.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Owns the one player process and everything it needs.
///
/// At most one process is alive per supervisor: `start` stops the previous
/// one first. Dropping the supervisor stops any live player and deletes the
/// overlay directory.
#[derive(Debug, Default)]
pub struct PlaybackSupervisor {
    options: PlayerOptions,
    process: Option<PlayerProcess>,
    session: Option<PlaybackSession>,
    overlay: OverlayStore,
}

impl PlaybackSupervisor {
    /// Create a supervisor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a supervisor with validated options.
    pub fn with_options(options: PlayerOptions) -> Result<Self, PlayerError> {
        let mut supervisor = Self::new();
        supervisor.configure(options)?;
        Ok(supervisor)
    }

    /// Replace the player options. Invalid options leave the current ones in place.
    pub fn configure(&mut self, options: PlayerOptions) -> Result<(), PlayerError> {
        options.validate()?;
        debug!(program = %options.program, show_titles = options.show_titles, "configured player");
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// File suffixes the player is expected to handle.
    pub fn supported_extensions() -> &'static [&'static str] {
        SUPPORTED_EXTENSIONS
    }

    /// Whether the player understands a finite repeat count.
    ///
    /// VLC can only loop forever, so callers wanting N repetitions must
    /// replay the file themselves.
    pub fn can_loop_natively() -> bool {
        false
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, |session| session.state)
    }

    /// The current or most recent session.
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Pid of the live player, if any.
    pub fn process_id(&self) -> Option<u32> {
        self.process.as_ref().map(PlayerProcess::id)
    }

    /// Private directory holding overlay files, once created.
    pub fn overlay_dir(&self) -> Option<&Path> {
        self.overlay.dir()
    }

    /// Launch the player for `media_path`.
    ///
    /// Any previous player is stopped first. The title, when titles are
    /// enabled and it is non-empty, is written to an overlay file handed to
    /// the player. Returns once the process is spawned; there is no
    /// readiness check.
    pub fn start(
        &mut self,
        media_path: &Path,
        looping: LoopMode,
        title: Option<&str>,
    ) -> Result<(), PlayerError> {
        self.stop(RESTART_STOP_TIMEOUT);
        self.session = None;

        let title = title.filter(|t| !t.is_empty());
        let overlay_path = match (self.options.overlay_header(), title) {
            (Some(header), Some(title)) => Some(self.overlay.write(&header, title)?),
            _ => None,
        };

        let loop_forever = looping.is_forever();
        let args = self
            .options
            .command_args(media_path, loop_forever, overlay_path.as_deref());

        let mut session = PlaybackSession::starting(
            media_path,
            loop_forever,
            title.map(str::to_string),
            overlay_path,
            args,
        );

        let process = match PlayerProcess::spawn(&self.options.program, &session.args) {
            Ok(process) => process,
            Err(e) => {
                if let Some(path) = &session.overlay_path {
                    self.overlay.discard(path);
                }
                return Err(e);
            }
        };

        info!(
            file = %media_path.display(),
            pid = process.id(),
            looping = loop_forever,
            "started playback"
        );
        session.state = SessionState::Playing;
        self.session = Some(session);
        self.process = Some(process);
        Ok(())
    }

    /// Launch the player for a media descriptor.
    ///
    /// `looping` of `None` defers to the media's repeat count.
    pub fn play(&mut self, media: &MediaFile, looping: Option<bool>) -> Result<(), PlayerError> {
        let mode = LoopMode::resolve(looping, media.repeats);
        self.start(&media.filename, mode, media.title.as_deref())
    }

    /// Whether the player process is alive. Never blocks.
    pub fn is_playing(&mut self) -> bool {
        self.process
            .as_mut()
            .map_or(false, |process| !process.has_exited())
    }

    pub fn is_paused(&self) -> bool {
        self.session.as_ref().map_or(false, |session| {
            session.state == SessionState::Playing && session.paused
        })
    }

    /// Suspend the player. Returns whether it is now paused by this call.
    pub fn pause(&mut self) -> bool {
        if self.is_paused() || !self.is_playing() {
            return false;
        }
        let (Some(process), Some(session)) = (self.process.as_mut(), self.session.as_mut()) else {
            return false;
        };
        match process.suspend() {
            Ok(()) => {
                session.paused = true;
                info!(file = %session.display_name(), "paused playback");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to pause player");
                false
            }
        }
    }

    /// Continue a paused player. Returns whether it was resumed by this call.
    pub fn resume(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        let (Some(process), Some(session)) = (self.process.as_mut(), self.session.as_mut()) else {
            return false;
        };
        match process.resume() {
            Ok(()) => {
                session.paused = false;
                info!(file = %session.display_name(), "resumed playback");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to resume player");
                false
            }
        }
    }

    /// Pause when playing, resume when paused.
    ///
    /// Returns the new paused flag, or `None` when nothing is playing.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        if self.is_paused() {
            self.resume();
            Some(self.is_paused())
        } else if self.is_playing() {
            self.pause();
            Some(self.is_paused())
        } else {
            None
        }
    }

    /// Stop the player, waiting up to `timeout` for it to exit.
    ///
    /// Sends a termination request, then polls until the process exits or
    /// the longer of `timeout` and [`TERMINATE_GRACE`] elapses. Only a
    /// process still alive after that is killed. The handle is released
    /// either way.
    pub fn stop(&mut self, timeout: Duration) {
        let Some(mut process) = self.process.take() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.state = SessionState::Stopping;
        }

        let started = Instant::now();
        if let Err(e) = process.terminate() {
            warn!(pid = process.id(), error = %e, "failed to signal player");
        }

        let deadline = timeout.max(TERMINATE_GRACE);
        while !process.has_exited() {
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                warn!(
                    pid = process.id(),
                    waited_ms = deadline.as_millis() as u64,
                    "player ignored termination request, killing"
                );
                process.kill();
                break;
            }
            thread::sleep(STOP_POLL_INTERVAL.min(deadline - elapsed));
        }

        info!(pid = process.id(), "stopped playback");
        self.finish_session(process);
    }

    /// Release the handle if the player exited on its own.
    ///
    /// Returns true when a finished session was reaped by this call.
    pub fn reap(&mut self) -> bool {
        let exited = self
            .process
            .as_mut()
            .map_or(false, PlayerProcess::has_exited);
        if !exited {
            return false;
        }
        let Some(process) = self.process.take() else {
            return false;
        };
        debug!(pid = process.id(), "player finished on its own");
        self.finish_session(process);
        true
    }

    fn finish_session(&mut self, process: PlayerProcess) {
        if let Some(session) = self.session.as_mut() {
            session.state = SessionState::Stopped;
            session.paused = false;
            session.exit_status = process.status();
            if let Some(path) = &session.overlay_path {
                self.overlay.discard(path);
            }
        }
    }

    /// Stop any live player and delete the overlay directory.
    ///
    /// Idempotent. Cleanup failures are logged, never raised.
    pub fn shutdown(&mut self) {
        self.stop(Duration::ZERO);
        self.overlay.close();
    }
}

impl Drop for PlaybackSupervisor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

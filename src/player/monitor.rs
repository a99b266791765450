//! Background task that notices when playback ends on its own.
//!
//! Wakes every `interval`, locks the shared supervisor, and reaps a player
//! that exited. Every access goes through the same mutex the control
//! thread uses, so the supervisor is never touched concurrently.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::supervisor::PlaybackSupervisor;

/// Supervisor shared between the control thread and the monitor.
pub type SharedSupervisor = Arc<Mutex<PlaybackSupervisor>>;

/// Lock the shared supervisor, recovering from a poisoned lock.
///
/// The supervisor stays consistent across a panic in another holder: every
/// mutation leaves the handle and session in a valid state.
pub fn lock(supervisor: &SharedSupervisor) -> MutexGuard<'_, PlaybackSupervisor> {
    supervisor.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the running monitor thread.
///
/// Stopped deterministically by [`PlaybackMonitor::shutdown`] or on drop.
#[derive(Debug)]
pub struct PlaybackMonitor {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PlaybackMonitor {
    /// Start polling `supervisor` every `interval`.
    pub fn spawn(supervisor: SharedSupervisor, interval: Duration) -> io::Result<Self> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::Builder::new()
            .name("playback-monitor".to_string())
            .spawn(move || monitor_loop(&supervisor, &flag, interval))?;

        debug!(interval_ms = interval.as_millis() as u64, "playback monitor started");
        Ok(Self {
            cancelled,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.cancelled.store(true, Ordering::Release);
        handle.thread().unpark();
        if handle.join().is_err() {
            warn!("playback monitor panicked");
        }
    }
}

impl Drop for PlaybackMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn monitor_loop(supervisor: &SharedSupervisor, cancelled: &AtomicBool, interval: Duration) {
    loop {
        // Spurious wakeups only cause an extra check
        thread::park_timeout(interval);
        if cancelled.load(Ordering::Acquire) {
            break;
        }

        let mut guard = lock(supervisor);
        if guard.reap() {
            if let Some(session) = guard.session() {
                let code = session.exit_status.and_then(|status| status.code());
                info!(file = %session.display_name(), ?code, "playback ended");
            }
        }
    }
    debug!("playback monitor stopped");
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::player::{LoopMode, PlayerOptions, SessionState};
    use std::path::Path;
    use std::time::Instant;

    fn shared(script: &str) -> SharedSupervisor {
        let options = PlayerOptions {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "monitor-test".to_string()],
            ..PlayerOptions::default()
        };
        Arc::new(Mutex::new(PlaybackSupervisor::with_options(options).unwrap()))
    }

    #[test]
    fn monitor_reaps_finished_player() {
        let supervisor = shared("exit 0");
        lock(&supervisor)
            .start(Path::new("/media/short.mp4"), LoopMode::Once, None)
            .unwrap();

        let mut monitor =
            PlaybackMonitor::spawn(Arc::clone(&supervisor), Duration::from_millis(20)).unwrap();
        assert!(monitor.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        while lock(&supervisor).state() != SessionState::Stopped && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(lock(&supervisor).state(), SessionState::Stopped);
        assert!(lock(&supervisor).process_id().is_none());

        monitor.shutdown();
        assert!(!monitor.is_running());
    }

    #[test]
    fn monitor_leaves_running_player() {
        let supervisor = shared("exec sleep 30");
        lock(&supervisor)
            .start(Path::new("/media/clip.mp4"), LoopMode::Once, None)
            .unwrap();

        let monitor =
            PlaybackMonitor::spawn(Arc::clone(&supervisor), Duration::from_millis(10)).unwrap();
        thread::sleep(Duration::from_millis(100));
        drop(monitor);

        assert_eq!(lock(&supervisor).state(), SessionState::Playing);
    }

    #[test]
    fn shutdown_does_not_wait_for_interval() {
        let supervisor = shared("exec sleep 30");
        let mut monitor =
            PlaybackMonitor::spawn(Arc::clone(&supervisor), Duration::from_secs(60)).unwrap();

        let started = Instant::now();
        monitor.shutdown();
        monitor.shutdown();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(Arc::strong_count(&supervisor), 1);
    }
}

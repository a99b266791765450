//! Foreground play command handler

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};
use video_looper::{media, Config, MediaFile, PlaybackSupervisor};

use super::shutdown_flag;

/// How often the foreground loop checks the player and the signal flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Play one file until the player exits or a shutdown signal arrives.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, file: &Path, looping: bool) -> Result<()> {
    if !file.is_file() {
        bail!("File not found: {}", file.display());
    }
    if !media::is_supported(file) {
        bail!("Unsupported file type: {}", file.display());
    }
    let path = file
        .canonicalize()
        .with_context(|| format!("Cannot resolve {}", file.display()))?;

    let mut supervisor = PlaybackSupervisor::with_options(config.player.to_options())?;
    let shutdown = shutdown_flag()?;

    let media = MediaFile::new(&path);
    supervisor.play(&media, Some(looping))?;
    println!("Playing {} (Ctrl-C to stop)", path.display());

    while supervisor.is_playing() {
        if shutdown.load(Ordering::Relaxed) {
            info!("shutdown signal received");
            supervisor.stop(config.player.stop_timeout());
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }

    supervisor.reap();
    if let Some(status) = supervisor.session().and_then(|s| s.exit_status) {
        if !status.success() && !shutdown.load(Ordering::Relaxed) {
            warn!(%status, "player exited with failure");
        }
    }
    supervisor.shutdown();
    Ok(())
}

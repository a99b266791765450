//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a media directory containing empty files with the given names.
pub fn media_dir(names: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

/// Write a config that runs `sh -c script` as the player.
///
/// The media path ends up in `$1` of the script.
pub fn sh_config(dir: &Path, script: &str, extra_player: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        "[looper]\n\
         directory = {:?}\n\
         autoplay = false\n\
         monitor_interval_ms = 50\n\
         \n\
         [player]\n\
         program = \"sh\"\n\
         args = [\"-c\", {:?}, \"looper-test\"]\n\
         stop_timeout_secs = 3\n\
         {}\n",
        dir.display().to_string(),
        script,
        extra_player
    );
    fs::write(&path, content).unwrap();
    path
}

/// Whether a process with this pid still exists.
#[cfg(unix)]
pub fn pid_alive(pid: u32) -> bool {
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

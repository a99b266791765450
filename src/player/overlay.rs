//! Title overlay files.
//!
//! VLC renders a subtitle file whose first line is the display duration in
//! seconds and whose second line is the text. The file lives in a private
//! temporary directory created on first use and removed on teardown.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use super::error::PlayerError;

/// Name of the overlay file inside the private directory.
pub const OVERLAY_FILE_NAME: &str = "video_looper.srt";

/// Owner of the private directory holding the overlay file.
#[derive(Debug, Default)]
pub struct OverlayStore {
    dir: Option<TempDir>,
}

impl OverlayStore {
    /// Directory holding overlay files, if one was created.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    fn ensure_dir(&mut self) -> io::Result<&Path> {
        let dir = match self.dir.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new().prefix("video-looper-").tempdir()?;
                debug!(path = %dir.path().display(), "created overlay directory");
                dir
            }
        };
        Ok(self.dir.insert(dir).path())
    }

    /// Write the overlay for `title`, replacing any previous one.
    ///
    /// `header` is the duration line including its newline.
    pub fn write(&mut self, header: &str, title: &str) -> Result<PathBuf, PlayerError> {
        let dir = self.ensure_dir().map_err(|source| PlayerError::Overlay {
            path: std::env::temp_dir(),
            source,
        })?;
        let path = dir.join(OVERLAY_FILE_NAME);

        let mut content = String::with_capacity(header.len() + title.len());
        content.push_str(header);
        content.push_str(title);

        fs::write(&path, content).map_err(|source| PlayerError::Overlay {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote title overlay");
        Ok(path)
    }

    /// Remove a previously written overlay file. Missing files are fine.
    pub fn discard(&self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed title overlay"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!(path = %path.display(), error = %e, "failed to remove title overlay"),
        }
    }

    /// Delete the directory and everything in it.
    ///
    /// Safe to call repeatedly; errors are logged and swallowed.
    pub fn close(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                debug!(path = %path.display(), error = %e, "overlay directory cleanup failed");
            }
        }
    }
}

impl Drop for OverlayStore {
    fn drop(&mut self) {
        self.close();
    }
}

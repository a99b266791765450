//! Media discovery: which files the looper can play.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

/// File suffixes handed to the player, lowercase with leading dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    // Video
    ".mp4", ".avi", ".mkv", ".flv", ".mov", ".wmv", ".mpg", ".mpeg", ".m4v", ".3gp", ".3g2",
    ".mxf", ".ogm", ".ogv", ".asf", ".rm", ".rmvb", ".webm", ".vob", ".ts", ".divx", ".dvr-ms",
    ".m2ts", ".mts", ".h264", ".h265",
    // Audio
    ".mp3", ".wav", ".ogg", ".flac", ".aac", ".m4a", ".wma", ".opus", ".alac", ".aiff", ".dts",
    ".ac3", ".mid", ".midi",
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp",
];

/// Whether the file name ends in a supported suffix (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// A file to play, with its title and repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Absolute path to the file
    pub filename: PathBuf,
    /// Title shown as an overlay when titles are enabled
    pub title: Option<String>,
    /// Number of repetitions; negative means forever
    pub repeats: i32,
}

impl MediaFile {
    /// Describe `path`, titled after its file stem, played once.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let filename = path.into();
        let title = filename
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty());
        Self {
            filename,
            title,
            repeats: 1,
        }
    }

    /// Repeat forever.
    pub fn looping(mut self) -> Self {
        self.repeats = -1;
        self
    }
}

/// Playable files directly inside `dir`, sorted by name.
pub fn list_media(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            continue;
        }
        if is_supported(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Pick a random file to start with, so boots do not always open on the
/// same clip.
pub fn pick_startup(files: &[PathBuf]) -> Option<&PathBuf> {
    files.choose(&mut rand::thread_rng())
}

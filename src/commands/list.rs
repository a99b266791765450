//! List command handler

use anyhow::{Context, Result};
use std::path::PathBuf;

use video_looper::{media, Config};

/// Print playable files in the media directory, one per line.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, dir: Option<PathBuf>) -> Result<()> {
    let directory = dir.unwrap_or_else(|| config.looper.directory.clone());
    let files = media::list_media(&directory)
        .with_context(|| format!("Cannot list {}", directory.display()))?;

    if files.is_empty() {
        eprintln!("No media files found in {}", directory.display());
        return Ok(());
    }

    for file in files {
        if let Some(name) = file.file_name() {
            println!("{}", name.to_string_lossy());
        }
    }
    Ok(())
}

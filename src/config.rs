//! Configuration file handling.
//!
//! The config lives at `<config dir>/video-looper/config.toml` unless
//! `VIDEO_LOOPER_CONFIG` or `--config` points elsewhere. Missing files and
//! missing keys fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::{PlayerOptions, DEFAULT_LOOP_FLAG, DEFAULT_OVERLAY_FLAG, DEFAULT_PROGRAM};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "VIDEO_LOOPER_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub looper: LooperConfig,
    pub player: PlayerConfig,
}

/// Where media comes from and how the looper behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LooperConfig {
    /// Directory scanned for media files
    pub directory: PathBuf,
    /// Start a random file when the console opens
    pub autoplay: bool,
    /// How often the monitor checks for finished playback
    pub monitor_interval_ms: u64,
}

impl Default for LooperConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/home/pi/video"),
            autoplay: true,
            monitor_interval_ms: 1000,
        }
    }
}

impl LooperConfig {
    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms.max(1))
    }
}

/// How the external player is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player binary
    pub program: String,
    /// Arguments passed to the player before the media path
    pub args: Vec<String>,
    /// Flag that makes the player loop forever
    pub loop_flag: String,
    /// Flag preceding the title overlay file
    pub overlay_flag: String,
    /// Render the file name as an on-screen title
    pub show_titles: bool,
    /// Seconds the title stays visible; required with `show_titles`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_duration: Option<i64>,
    /// Seconds to wait for the player to exit when stopping
    pub stop_timeout_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: vec![
                "--fullscreen".to_string(),
                "--no-video-title-show".to_string(),
                "--play-and-exit".to_string(),
            ],
            loop_flag: DEFAULT_LOOP_FLAG.to_string(),
            overlay_flag: DEFAULT_OVERLAY_FLAG.to_string(),
            show_titles: false,
            title_duration: None,
            stop_timeout_secs: 3,
        }
    }
}

impl PlayerConfig {
    /// Options for the supervisor. Validation happens in `configure`.
    pub fn to_options(&self) -> PlayerOptions {
        PlayerOptions {
            program: self.program.clone(),
            args: self.args.clone(),
            loop_flag: self.loop_flag.clone(),
            overlay_flag: self.overlay_flag.clone(),
            show_titles: self.show_titles,
            title_duration: self.title_duration,
        }
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }
}

impl Config {
    /// Default config file path, honoring `VIDEO_LOOPER_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("video-looper").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }
}

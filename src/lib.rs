//! Video Looper - loop media files on a Raspberry Pi through an external player
//!
//! The core is [`player::PlaybackSupervisor`], which owns exactly one player
//! process at a time. Around it sit media discovery ([`media`]), the TOML
//! configuration ([`config`]), and the interactive text console ([`console`]).

pub mod cli;
pub mod config;
pub mod console;
pub mod media;
pub mod player;

pub use config::Config;
pub use media::MediaFile;
pub use player::{PlaybackSupervisor, PlayerError, PlayerOptions};

//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod list;
pub mod play;
pub mod run;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTERM};

/// Flag raised on SIGINT or SIGTERM so the player can be stopped cleanly.
pub fn shutdown_flag() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))
            .with_context(|| format!("Failed to register handler for signal {}", signal))?;
    }
    Ok(flag)
}

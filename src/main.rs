//! video-looper binary entry point

mod commands;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use video_looper::cli::{Cli, Commands, ConfigCommands};
use video_looper::Config;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { dir, no_autoplay } => {
            let config = load_config(config_path)?;
            commands::run::handle(&config, dir, no_autoplay)
        }
        Commands::Play { file, looping } => {
            let config = load_config(config_path)?;
            commands::play::handle(&config, &file, looping)
        }
        Commands::List { dir } => {
            let config = load_config(config_path)?;
            commands::list::handle(&config, dir)
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&resolve_config_path(config_path)?)
        }
        Commands::Config(ConfigCommands::Init { force }) => {
            commands::config::handle_init(&resolve_config_path(config_path)?, force)
        }
        Commands::Config(ConfigCommands::Path) => {
            commands::config::handle_path(&resolve_config_path(config_path)?)
        }
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

/// `--config` if given, otherwise the default location.
fn resolve_config_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

fn load_config(flag: Option<&Path>) -> Result<Config> {
    let path = resolve_config_path(flag)?;
    let config = Config::load_from(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

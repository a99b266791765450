//! Command-line interface definitions.
//!
//! Kept in the library so `xtask` can render man pages from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git SHA and build date.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("LOOPER_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "video-looper",
    version,
    long_version = LONG_VERSION,
    about = "Loop videos on a Raspberry Pi through an external player",
    long_about = "Loop videos on a Raspberry Pi through an external player.\n\n\
        Media files are read from a directory and handed to VLC (or any player \
        configured in config.toml). The interactive console accepts list, play, \
        loop, pause, stop, state and quit."
)]
pub struct Cli {
    /// Path to the config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive console and start looping
    Run {
        /// Media directory (overrides config)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Do not start a random file on launch
        #[arg(long)]
        no_autoplay: bool,
    },

    /// Play a single file in the foreground until it ends or Ctrl-C
    Play {
        /// Media file to play
        file: PathBuf,

        /// Repeat the file until interrupted
        #[arg(long = "loop")]
        looping: bool,
    },

    /// List playable files in the media directory
    List {
        /// Media directory (overrides config)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

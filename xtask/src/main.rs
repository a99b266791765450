//! Development tasks for video-looper.
//!
//! `cargo run -p xtask -- man` renders the man page from the CLI definitions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use video_looper::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for video-looper")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man(&out),
    }
}

fn generate_man(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let command = Cli::command();
    let path = out.join("video-looper.1");
    let mut buffer = Vec::new();
    clap_mangen::Man::new(command.clone()).render(&mut buffer)?;
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated {}", path.display());

    for sub in command.get_subcommands() {
        let name = format!("video-looper-{}", sub.get_name());
        let path = out.join(format!("{}.1", name));
        let mut buffer = Vec::new();
        clap_mangen::Man::new(sub.clone())
            .title(name)
            .render(&mut buffer)?;
        fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Generated {}", path.display());
    }
    Ok(())
}

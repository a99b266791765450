//! Interactive console handler
//!
//! Stdin is read on its own thread and forwarded over a channel so the
//! control loop can also notice SIGINT/SIGTERM while waiting for input.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::info;
use video_looper::console::{Console, Flow, HELP};
use video_looper::player::{lock, PlaybackMonitor, PlaybackSupervisor};
use video_looper::Config;

use super::shutdown_flag;

/// How long the control loop waits for input before checking signals.
const INPUT_POLL: Duration = Duration::from_millis(200);

/// Run the console until `quit`, end of input, or a shutdown signal.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, dir: Option<PathBuf>, no_autoplay: bool) -> Result<()> {
    let directory = dir.unwrap_or_else(|| config.looper.directory.clone());
    let supervisor = PlaybackSupervisor::with_options(config.player.to_options())?;
    let supervisor = Arc::new(Mutex::new(supervisor));
    let mut monitor =
        PlaybackMonitor::spawn(Arc::clone(&supervisor), config.looper.monitor_interval())?;
    let console = Console::new(
        Arc::clone(&supervisor),
        directory,
        config.player.stop_timeout(),
    );
    let shutdown = shutdown_flag()?;
    let interactive = atty::is(atty::Stream::Stdin);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.looper.autoplay && !no_autoplay {
        console.autoplay(&mut out)?;
    }
    writeln!(out, "Video Looper console ({})", console.directory().display())?;
    writeln!(out, "{}", HELP)?;

    let lines = spawn_stdin_reader()?;
    prompt(&mut out, interactive)?;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("shutdown signal received");
            break;
        }
        match lines.recv_timeout(INPUT_POLL) {
            Ok(line) => {
                if console.handle_line(&line, &mut out)? == Flow::Quit {
                    break;
                }
                prompt(&mut out, interactive)?;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    monitor.shutdown();
    lock(&supervisor).shutdown();
    Ok(())
}

fn prompt(out: &mut impl Write, interactive: bool) -> io::Result<()> {
    if interactive {
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

/// Forward stdin lines over a channel. The channel closes at end of input.
fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                // Receiver gone means the console already quit
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

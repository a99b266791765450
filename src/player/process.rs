//! The external player process.

use std::ffi::OsString;
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use super::error::PlayerError;

/// A launched player process.
///
/// The exit status is cached once observed. Signals are only sent while the
/// status is unknown: an unreaped child keeps its pid, so the pid cannot have
/// been recycled.
#[derive(Debug)]
pub struct PlayerProcess {
    child: Child,
    program: String,
    status: Option<ExitStatus>,
    /// Set when the child can no longer be polled; it is treated as gone.
    lost: bool,
}

impl PlayerProcess {
    /// Launch `program` with `args`, detached from the terminal's stdio.
    pub fn spawn(program: &str, args: &[OsString]) -> Result<Self, PlayerError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PlayerError::Launch {
                program: program.to_string(),
                source,
            })?;

        debug!(program, pid = child.id(), "spawned player");
        Ok(Self {
            child,
            program: program.to_string(),
            status: None,
            lost: false,
        })
    }

    /// OS process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Exit status, if the process has been observed to exit.
    pub fn status(&self) -> Option<ExitStatus> {
        self.status
    }

    /// Zero-wait check whether the process has exited.
    ///
    /// A child that cannot be polled is killed where that is still safe and
    /// then reported as exited with no status.
    pub fn has_exited(&mut self) -> bool {
        if self.status.is_some() || self.lost {
            return true;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!(program = %self.program, pid = self.id(), %status, "player exited");
                self.status = Some(status);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(program = %self.program, pid = self.id(), error = %e, "failed to poll player");
                self.abandon(&e);
                true
            }
        }
    }

    fn abandon(&mut self, error: &io::Error) {
        self.lost = true;
        // ECHILD: reaped elsewhere, the pid may already belong to another process
        #[cfg(unix)]
        if error.raw_os_error() == Some(libc::ECHILD) {
            return;
        }
        #[cfg(not(unix))]
        let _ = error;
        if let Err(e) = self.child.kill() {
            debug!(program = %self.program, error = %e, "kill after failed poll");
        }
    }

    /// Ask the process to exit.
    pub fn terminate(&mut self) -> io::Result<()> {
        if self.has_exited() {
            return Ok(());
        }
        self.signal_terminate()
    }

    #[cfg(unix)]
    fn signal_terminate(&mut self) -> io::Result<()> {
        self.send_signal(libc::SIGTERM)?;
        // A stopped process only acts on SIGTERM once continued
        self.send_signal(libc::SIGCONT)
    }

    #[cfg(not(unix))]
    fn signal_terminate(&mut self) -> io::Result<()> {
        self.child.kill()
    }

    /// Suspend the process.
    #[cfg(unix)]
    pub fn suspend(&mut self) -> io::Result<()> {
        if self.has_exited() {
            return Ok(());
        }
        self.send_signal(libc::SIGSTOP)
    }

    /// Continue a suspended process.
    #[cfg(unix)]
    pub fn resume(&mut self) -> io::Result<()> {
        if self.has_exited() {
            return Ok(());
        }
        self.send_signal(libc::SIGCONT)
    }

    #[cfg(not(unix))]
    pub fn suspend(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "pausing requires job control signals",
        ))
    }

    #[cfg(not(unix))]
    pub fn resume(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "pausing requires job control signals",
        ))
    }

    #[cfg(unix)]
    fn send_signal(&self, signal: libc::c_int) -> io::Result<()> {
        let pid = self.child.id() as libc::pid_t;
        // SAFETY: pid belongs to our unreaped child, so it cannot be reused.
        let rc = unsafe { libc::kill(pid, signal) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    /// Kill the process and reap it.
    pub fn kill(&mut self) {
        if self.has_exited() {
            return;
        }
        if let Err(e) = self.child.kill() {
            if e.kind() != io::ErrorKind::InvalidInput {
                warn!(program = %self.program, error = %e, "failed to kill player");
            }
        }
        match self.child.wait() {
            Ok(status) => self.status = Some(status),
            Err(e) => warn!(program = %self.program, error = %e, "failed to reap player"),
        }
    }
}

//! Process capability layer
//!
//! The controller only talks to [`ProcessHandle`] and [`Launcher`], which
//! keeps the OS-specific parts (stop/continue signals) in one place and
//! lets platforms without job control report pause as unsupported.

use crate::{ReadAloudError, Result};
use std::io;
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Control surface over one running external process
pub trait ProcessHandle {
    /// OS process id
    fn id(&self) -> u32;

    /// Suspend execution without terminating
    fn suspend(&mut self) -> Result<()>;

    /// Continue a suspended process
    fn continue_(&mut self) -> Result<()>;

    /// Ask the process to exit
    fn terminate(&mut self) -> Result<()>;

    /// Force the process to exit
    fn kill(&mut self) -> Result<()>;

    /// Non-blocking liveness check; reaps the process once it has exited
    fn is_alive(&mut self) -> Result<bool>;

    /// Block until the process has exited and been reaped
    fn wait(&mut self) -> Result<()>;
}

/// Spawns external processes
pub trait Launcher {
    /// Start `program` with `args`, passing each argument verbatim
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<Box<dyn ProcessHandle>>;
}

/// Launcher backed by `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<Box<dyn ProcessHandle>> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Box::new(SystemProcess { child }))
    }
}

/// A child process started by [`SystemLauncher`]
#[derive(Debug)]
pub struct SystemProcess {
    child: Child,
}

#[cfg(unix)]
impl SystemProcess {
    fn signal(&self, signal: nix::sys::signal::Signal) -> Result<()> {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let pid = Pid::from_raw(self.child.id() as i32);
        kill(pid, signal).map_err(|e| {
            ReadAloudError::SignalError(format!("{} to pid {}: {}", signal.as_str(), pid, e))
        })
    }
}

impl ProcessHandle for SystemProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    #[cfg(unix)]
    fn suspend(&mut self) -> Result<()> {
        self.signal(nix::sys::signal::Signal::SIGSTOP)
    }

    #[cfg(not(unix))]
    fn suspend(&mut self) -> Result<()> {
        Err(ReadAloudError::UnsupportedError("suspending a process".into()))
    }

    #[cfg(unix)]
    fn continue_(&mut self) -> Result<()> {
        self.signal(nix::sys::signal::Signal::SIGCONT)
    }

    #[cfg(not(unix))]
    fn continue_(&mut self) -> Result<()> {
        Err(ReadAloudError::UnsupportedError("continuing a process".into()))
    }

    #[cfg(unix)]
    fn terminate(&mut self) -> Result<()> {
        self.signal(nix::sys::signal::Signal::SIGTERM)
    }

    // No graceful terminate without signals
    #[cfg(not(unix))]
    fn terminate(&mut self) -> Result<()> {
        self.kill()
    }

    fn kill(&mut self) -> Result<()> {
        self.child
            .kill()
            .map_err(|e| ReadAloudError::SignalError(format!("kill pid {}: {}", self.child.id(), e)))
    }

    fn is_alive(&mut self) -> Result<bool> {
        match self.child.try_wait()? {
            Some(status) => {
                debug!("Process {} exited with {}", self.child.id(), status);
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn wait(&mut self) -> Result<()> {
        let status = self.child.wait()?;
        debug!("Process {} reaped with {}", self.child.id(), status);
        Ok(())
    }
}

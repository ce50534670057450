//! Speech process controller
//!
//! Owns at most one running synthesizer process and maps the user's
//! speak/pause/resume/stop intents onto process control. Completion is
//! detected by the caller polling [`SpeechController::poll_completion`];
//! the controller never starts threads or timers of its own.

use crate::config::AppConfig;
use crate::speech::engine::{EngineConfig, UtteranceRequest};
use crate::speech::normalize::normalize;
use crate::speech::process::{Launcher, ProcessHandle, SystemLauncher};
use crate::{ReadAloudError, Result};
use std::io;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default time to wait for the process to exit after a terminate signal
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// How often `stop` re-checks the process while waiting for it to exit
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No process
    #[default]
    Idle,
    /// Process running
    Speaking,
    /// Process exists but is suspended
    Paused,
}

/// Why the controller last returned to idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The process exited on its own
    Finished,
    /// `stop` (or a new `speak`) ended it
    Stopped,
}

/// The process behind the utterance currently being spoken
struct ActiveUtterance {
    process: Box<dyn ProcessHandle>,
    paused: bool,
    text: String,
}

/// Drives one external speech process at a time
pub struct SpeechController {
    engine: EngineConfig,
    launcher: Box<dyn Launcher>,
    active: Option<ActiveUtterance>,
    stop_timeout: Duration,
    last_stop_reason: Option<StopReason>,
}

impl SpeechController {
    /// Create a controller that spawns real processes
    pub fn new(engine: EngineConfig) -> Self {
        Self::with_launcher(engine, Box::new(SystemLauncher))
    }

    /// Create a controller with a custom launcher
    pub fn with_launcher(engine: EngineConfig, launcher: Box<dyn Launcher>) -> Self {
        Self {
            engine,
            launcher,
            active: None,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            last_stop_reason: None,
        }
    }

    /// Create a controller from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.engine.clone()).with_stop_timeout(config.stop_timeout())
    }

    /// Set how long `stop` waits before forcing the process down
    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Current state, derived from the process handle
    pub fn state(&self) -> ControllerState {
        match &self.active {
            None => ControllerState::Idle,
            Some(active) if active.paused => ControllerState::Paused,
            Some(_) => ControllerState::Speaking,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Whether a process handle is currently held
    pub fn has_process(&self) -> bool {
        self.active.is_some()
    }

    /// Reason for the most recent return to idle
    pub fn last_stop_reason(&self) -> Option<StopReason> {
        self.last_stop_reason
    }

    /// Normalized text of the utterance being spoken
    pub fn current_text(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.text.as_str())
    }

    /// OS process id of the live utterance
    pub fn process_id(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.process.id())
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Start speaking, replacing any utterance in progress
    pub fn speak(&mut self, request: &UtteranceRequest) -> Result<()> {
        let text = normalize(&request.text);
        if text.is_empty() {
            return Err(ReadAloudError::UserInputError(
                "text is empty after normalization".into(),
            ));
        }

        self.stop();

        let args = self.engine.args_for(request, &text);
        let process = self
            .launcher
            .launch(&self.engine.program, &args)
            .map_err(|e| self.launch_error(e))?;

        info!(
            "Speaking {} chars with {} (pid {}, speed {}, pitch {}, volume {})",
            text.chars().count(),
            self.engine.program,
            process.id(),
            request.speed,
            request.pitch,
            request.volume
        );

        self.active = Some(ActiveUtterance {
            process,
            paused: false,
            text,
        });
        Ok(())
    }

    fn launch_error(&self, e: io::Error) -> ReadAloudError {
        if e.kind() == io::ErrorKind::NotFound {
            error!("Speech program {} not found", self.engine.program);
            ReadAloudError::DependencyMissingError(self.engine.program.clone())
        } else {
            error!("Failed to launch {}: {}", self.engine.program, e);
            ReadAloudError::LaunchError(e.to_string())
        }
    }

    /// Suspend the running utterance; ignored unless speaking
    pub fn pause(&mut self) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        if active.paused {
            return Ok(());
        }

        active.process.suspend()?;
        active.paused = true;
        debug!("Paused pid {}", active.process.id());
        Ok(())
    }

    /// Continue a paused utterance; ignored unless paused
    pub fn resume(&mut self) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        if !active.paused {
            return Ok(());
        }

        active.process.continue_()?;
        active.paused = false;
        debug!("Resumed pid {}", active.process.id());
        Ok(())
    }

    /// Stop speaking and wait for the process to be gone
    pub fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let pid = active.process.id();
        shutdown(active, self.stop_timeout);
        self.last_stop_reason = Some(StopReason::Stopped);
        info!("Stopped pid {}", pid);
    }

    /// Check whether the process has exited on its own
    ///
    /// Returns `Ok(true)` exactly once per naturally finished utterance,
    /// after which the controller is idle. Never blocks while the process
    /// can be queried. A process that can no longer be queried is shut down
    /// and the query failure returned, leaving the controller idle.
    pub fn poll_completion(&mut self) -> Result<bool> {
        let Some(active) = self.active.as_mut() else {
            return Ok(false);
        };

        let pid = active.process.id();
        match active.process.is_alive() {
            Ok(true) => Ok(false),
            Ok(false) => {
                self.active = None;
                self.last_stop_reason = Some(StopReason::Finished);
                info!("Speech finished (pid {})", pid);
                Ok(true)
            }
            Err(e) => {
                error!("Lost track of pid {}: {}", pid, e);
                if let Some(active) = self.active.take() {
                    shutdown(active, self.stop_timeout);
                }
                self.last_stop_reason = Some(StopReason::Stopped);
                Err(ReadAloudError::SignalError(format!("query pid {}: {}", pid, e)))
            }
        }
    }
}

impl Drop for SpeechController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Terminate a process and make sure it has been reaped
fn shutdown(mut active: ActiveUtterance, timeout: Duration) {
    let pid = active.process.id();

    // A stopped process does not act on the terminate signal until continued
    if active.paused {
        if let Err(e) = active.process.continue_() {
            warn!("Failed to continue pid {} before terminating: {}", pid, e);
        }
    }

    if let Err(e) = active.process.terminate() {
        warn!("Failed to terminate pid {}: {}", pid, e);
    }

    let deadline = Instant::now() + timeout;
    loop {
        match active.process.is_alive() {
            Ok(false) => return,
            Ok(true) if Instant::now() < deadline => thread::sleep(STOP_POLL_INTERVAL),
            Ok(true) => {
                warn!("Pid {} ignored terminate for {:?}, killing", pid, timeout);
                break;
            }
            Err(e) => {
                warn!("Failed to query pid {} while stopping, killing: {}", pid, e);
                break;
            }
        }
    }

    if let Err(e) = active.process.kill() {
        error!("Failed to kill pid {}: {}", pid, e);
    }
    if let Err(e) = active.process.wait() {
        error!("Failed to reap pid {}: {}", pid, e);
    }
}

//! Application state management
//!
//! This module provides the central state for the ReadAloud UI. Button
//! affordances are derived from the controller state, never stored.

use crate::config::{AppConfig, VoiceSettings};
use crate::speech::{ControllerState, SpeechController};
use crate::ReadAloudError;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{info, warn};

const MAX_LOG_MESSAGES: usize = 100;

/// Debug information displayed in the debug panel
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    /// Number of utterances started this session
    pub utterances: usize,
    /// Recent log messages
    pub log_messages: VecDeque<String>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self {
            log_messages: VecDeque::with_capacity(MAX_LOG_MESSAGES),
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, message: String) {
        if self.log_messages.len() >= MAX_LOG_MESSAGES {
            self.log_messages.pop_front();
        }
        self.log_messages.push_back(message);
    }
}

/// An error waiting to be acknowledged by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
    pub detail: String,
}

impl ErrorNotice {
    pub fn from_error(error: &ReadAloudError) -> Self {
        let title = if error.is_recoverable() {
            "Warning"
        } else {
            "Error"
        };

        Self {
            title: title.to_string(),
            message: error.user_message(),
            detail: error.to_string(),
        }
    }
}

/// Central application state
pub struct AppState {
    /// Editor contents
    pub text: String,

    /// Editor cursor as a character index
    pub cursor: usize,

    /// Current slider values
    pub voice: VoiceSettings,

    /// Speech process controller
    pub controller: SpeechController,

    /// Error shown in a modal window until dismissed
    pub notice: Option<ErrorNotice>,

    /// Set when the editor should move its cursor back to the start
    pub cursor_reset_pending: bool,

    /// Debug information
    pub debug_info: DebugInfo,

    /// Whether to show the debug panel
    pub show_debug_panel: bool,

    /// Completion polling cadence
    pub poll_interval: Duration,
}

impl AppState {
    /// Create state with a controller that spawns real processes
    pub fn new(config: &AppConfig) -> Self {
        Self::with_controller(config, SpeechController::from_config(config))
    }

    /// Create state around an existing controller
    pub fn with_controller(config: &AppConfig, controller: SpeechController) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            voice: config.voice.clamped(),
            controller,
            notice: None,
            cursor_reset_pending: false,
            debug_info: DebugInfo::new(),
            show_debug_panel: false,
            poll_interval: config.poll_interval(),
        }
    }

    pub fn speech_state(&self) -> ControllerState {
        self.controller.state()
    }

    pub fn can_speak(&self) -> bool {
        self.speech_state() == ControllerState::Idle
    }

    pub fn can_pause(&self) -> bool {
        self.speech_state() == ControllerState::Speaking
    }

    pub fn can_resume(&self) -> bool {
        self.speech_state() == ControllerState::Paused
    }

    /// Number of characters in the editor
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Text from the cursor to the end of the document
    pub fn text_from_cursor(&self) -> String {
        self.text.chars().skip(self.cursor).collect()
    }

    /// Speak from the editor cursor with the current slider values
    pub fn speak_from_cursor(&mut self) {
        let request = self.voice.request(self.text_from_cursor());

        match self.controller.speak(&request) {
            Ok(()) => {
                self.debug_info.utterances += 1;
                self.debug_info.add_log(format!(
                    "Speaking from character {} (speed {}, pitch {}, volume {})",
                    self.cursor, request.speed, request.pitch, request.volume
                ));
            }
            Err(e) => self.report_error(e),
        }
    }

    pub fn pause(&mut self) {
        let before = self.speech_state();
        match self.controller.pause() {
            Ok(()) if self.speech_state() != before => self.debug_info.add_log("Paused".to_string()),
            Ok(()) => {}
            Err(e) => self.report_error(e),
        }
    }

    pub fn resume(&mut self) {
        let before = self.speech_state();
        match self.controller.resume() {
            Ok(()) if self.speech_state() != before => self.debug_info.add_log("Resumed".to_string()),
            Ok(()) => {}
            Err(e) => self.report_error(e),
        }
    }

    pub fn stop(&mut self) {
        if !self.controller.is_idle() {
            self.controller.stop();
            self.debug_info.add_log("Stopped".to_string());
        }
    }

    /// Stop speaking and empty the editor
    pub fn clear(&mut self) {
        self.stop();
        self.text.clear();
        self.cursor = 0;
        self.cursor_reset_pending = true;
        self.debug_info.add_log("Cleared text".to_string());
    }

    /// Check for natural completion; call every `poll_interval` while speaking
    ///
    /// Returns true when the utterance finished on its own. Only then is the
    /// cursor moved back to the start of the text.
    pub fn poll(&mut self) -> bool {
        match self.controller.poll_completion() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                self.report_error(e);
                return false;
            }
        }

        self.cursor = 0;
        self.cursor_reset_pending = true;
        self.debug_info.add_log("Finished speaking".to_string());
        true
    }

    /// Warn up front when the speech program is not installed
    ///
    /// The app stays usable; speaking fails until the program is installed.
    pub fn check_dependency(&mut self) -> bool {
        let engine = self.controller.engine();
        if engine.is_installed() {
            return true;
        }

        let program = engine.program.clone();
        self.report_error(ReadAloudError::DependencyMissingError(program));
        false
    }

    /// Show an error to the user
    pub fn report_error(&mut self, error: ReadAloudError) {
        if error.is_recoverable() {
            info!("{}", error);
        } else {
            warn!("{}", error);
        }
        self.debug_info.add_log(error.to_string());
        self.notice = Some(ErrorNotice::from_error(&error));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

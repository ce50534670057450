//! External speech program description
//!
//! The engine is a command-line synthesizer (espeak by default). This module
//! owns the argument encoding of an utterance and the presence check.

use serde::Deserialize;
use std::process::{Command, Stdio};
use tracing::debug;

/// Default external synthesizer
pub const DEFAULT_PROGRAM: &str = "espeak";

/// A single request to speak text with the given voice parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtteranceRequest {
    /// Raw text; normalized by the controller before launch
    pub text: String,

    /// Words per minute (recommended 80-450)
    pub speed: u32,

    /// Pitch adjustment (recommended 0-99)
    pub pitch: u32,

    /// Amplitude (recommended 0-200)
    pub volume: u32,
}

impl UtteranceRequest {
    pub fn new(text: impl Into<String>, speed: u32, pitch: u32, volume: u32) -> Self {
        Self {
            text: text.into(),
            speed,
            pitch,
            volume,
        }
    }
}

/// Configuration of the external speech program
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program name or path, resolved through `PATH`
    pub program: String,

    /// Arguments placed before the voice flags (e.g. `-v en-us`)
    pub extra_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Add arguments placed before the voice flags
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Build the argument vector for an already normalized text
    ///
    /// Order is stable: `extra_args..., -s<speed>, -p<pitch>, -a<volume>, --, <text>`.
    /// The text is always the last element and is never shell-interpreted.
    /// `--` ends option parsing so text starting with `-` is spoken, not parsed.
    pub fn args_for(&self, request: &UtteranceRequest, normalized_text: &str) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push(format!("-s{}", request.speed));
        args.push(format!("-p{}", request.pitch));
        args.push(format!("-a{}", request.volume));
        args.push("--".to_string());
        args.push(normalized_text.to_string());
        args
    }

    /// Check whether the program can be run on this system
    pub fn is_installed(&self) -> bool {
        let available = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok();

        debug!("Presence check for {}: {}", self.program, available);
        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine() {
        let engine = EngineConfig::default();
        assert_eq!(engine.program, "espeak");
        assert!(engine.extra_args.is_empty());
    }

    #[test]
    fn test_args_order() {
        let engine = EngineConfig::default();
        let request = UtteranceRequest::new("  Hello, World!!  ", 280, 40, 100);

        let args = engine.args_for(&request, "Hello, World!!");
        assert_eq!(args, vec!["-s280", "-p40", "-a100", "--", "Hello, World!!"]);
    }

    #[test]
    fn test_extra_args_come_first() {
        let engine = EngineConfig::new("espeak-ng").with_extra_args(["-v", "en-us"]);
        let request = UtteranceRequest::new("hi", 120, 0, 200);

        let args = engine.args_for(&request, "hi");
        assert_eq!(args, vec!["-v", "en-us", "-s120", "-p0", "-a200", "--", "hi"]);
    }

    #[test]
    fn test_text_stays_single_argument() {
        let engine = EngineConfig::default();
        let request = UtteranceRequest::new("", 280, 40, 100);

        let args = engine.args_for(&request, "rm -rf it's fine; echo");
        assert_eq!(args.last().map(String::as_str), Some("rm -rf it's fine; echo"));
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn test_dash_text_follows_end_of_options() {
        let engine = EngineConfig::default();
        let request = UtteranceRequest::new("-wout", 280, 40, 100);

        let args = engine.args_for(&request, "-wout");
        assert_eq!(&args[args.len() - 2..], ["--", "-wout"]);
    }

    #[test]
    fn test_missing_program_not_installed() {
        let engine = EngineConfig::new("readaloud-no-such-speech-program");
        assert!(!engine.is_installed());
    }
}

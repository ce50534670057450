//! Speech modules
//!
//! This module provides:
//! - Text normalization for command-line synthesis
//! - The external engine description and argument encoding
//! - Process control behind a capability trait
//! - The speech process controller

pub mod controller;
pub mod engine;
pub mod normalize;
pub mod process;

// Re-export commonly used types
pub use controller::{ControllerState, SpeechController, StopReason, DEFAULT_STOP_TIMEOUT};
pub use engine::{EngineConfig, UtteranceRequest, DEFAULT_PROGRAM};
pub use normalize::{is_speakable, looks_like_markup, normalize, strip_markup};
pub use process::{Launcher, ProcessHandle, SystemLauncher, SystemProcess};

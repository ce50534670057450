pub mod config;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadAloudError {
    #[error("Nothing to speak: {0}")]
    UserInputError(String),

    #[error("Speech program not found: {0}")]
    DependencyMissingError(String),

    #[error("Failed to launch speech program: {0}")]
    LaunchError(String),

    #[error("Unsupported on this platform: {0}")]
    UnsupportedError(String),

    #[error("Signal error: {0}")]
    SignalError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for ReadAloudError {
    fn from(e: std::io::Error) -> Self {
        ReadAloudError::IOError(e.to_string())
    }
}

impl ReadAloudError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The user just needs to fix the text or cursor
            ReadAloudError::UserInputError(_) => true,
            // Requires installing the program outside the app
            ReadAloudError::DependencyMissingError(_) => false,
            ReadAloudError::LaunchError(_) => true,
            ReadAloudError::UnsupportedError(_) => false,
            // Usually the process exited between the click and the signal
            ReadAloudError::SignalError(_) => true,
            ReadAloudError::ConfigError(_) => false,
            ReadAloudError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ReadAloudError::UserInputError(_) => {
                "Please place the cursor in the text and ensure there is text to speak.".to_string()
            }
            ReadAloudError::DependencyMissingError(program) => {
                format!("{} command not found. Please ensure {} is installed.", program, program)
            }
            ReadAloudError::LaunchError(detail) => {
                format!("An unexpected error occurred: {}", detail)
            }
            ReadAloudError::UnsupportedError(_) => {
                "Pause and resume are not supported on this platform.".to_string()
            }
            ReadAloudError::SignalError(_) => {
                "The speech process did not respond. Please try again.".to_string()
            }
            ReadAloudError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            ReadAloudError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadAloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReadAloudError = io.into();
        assert!(matches!(err, ReadAloudError::IOError(ref msg) if msg.contains("denied")));
    }

    #[test]
    fn test_recoverability() {
        assert!(ReadAloudError::UserInputError("empty".into()).is_recoverable());
        assert!(ReadAloudError::LaunchError("EAGAIN".into()).is_recoverable());
        assert!(!ReadAloudError::DependencyMissingError("espeak".into()).is_recoverable());
        assert!(!ReadAloudError::UnsupportedError("pause".into()).is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let missing = ReadAloudError::DependencyMissingError("espeak".into());
        assert_eq!(
            missing.user_message(),
            "espeak command not found. Please ensure espeak is installed."
        );

        let launch = ReadAloudError::LaunchError("resource limit".into());
        assert!(launch.user_message().contains("resource limit"));
    }
}

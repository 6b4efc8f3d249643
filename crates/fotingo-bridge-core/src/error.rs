//! Error types for the fotingo bridge

use thiserror::Error;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Subprocess invocation errors
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    /// Release context could not be parsed
    #[error("Invalid release context: {0}")]
    Context(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by a single external command invocation
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The executable could not be located on the search path
    #[error("Could not locate {name}: {source}")]
    NotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    /// The process could not be started
    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited with a failing status
    #[error("{command} exited with code {code}")]
    ExitCode { command: String, code: i32 },
}

impl InvokeError {
    /// Exit code carried by this error, if the process ran at all
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitCode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_error_message_contains_code() {
        let err = InvokeError::ExitCode {
            command: "fotingo".to_string(),
            code: 1,
        };
        assert_eq!(err.to_string(), "fotingo exited with code 1");
        assert_eq!(err.exit_code(), Some(1));
    }

    #[test]
    fn test_launch_error_keeps_source_message() {
        let err = InvokeError::Launch {
            command: "fotingo".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert!(err.to_string().contains("No such file"));
        assert_eq!(err.exit_code(), None);
    }
}

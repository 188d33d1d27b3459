//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file could not be loaded
    #[error("Cannot load config {path}: {source}")]
    Config {
        /// Config file path
        path: String,
        /// Underlying failure
        source: surefoot::SurefootError,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Surefoot library error
    #[error("{0}")]
    Surefoot(#[from] surefoot::SurefootError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config {
            path: "surefoot.yaml".to_string(),
            source: surefoot::SurefootError::config("poll_interval_ms must be greater than 0"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot load config surefoot.yaml: Configuration error: poll_interval_ms must be greater than 0"
        );
    }

    #[test]
    fn test_from_surefoot_error() {
        let err: CliError = surefoot::SurefootError::NoAlertPresent.into();
        assert!(matches!(err, CliError::Surefoot(_)));
        assert_eq!(err.to_string(), "No alert present");
    }

    #[test]
    fn test_invalid_argument() {
        let err = CliError::invalid_argument("timeout must be positive");
        assert!(err.to_string().contains("timeout must be positive"));
    }
}

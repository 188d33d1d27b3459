//! Result and error types for Surefoot.
//!
//! Every driver failure is a [`SurefootError`]. The variants mirror the
//! failure kinds a WebDriver session reports, and [`SurefootError::kind`]
//! groups them into the classes the waiting and retrying code acts on.

use std::time::Duration;
use thiserror::Error;

/// Result type for Surefoot operations
pub type SurefootResult<T> = Result<T, SurefootError>;

/// Errors that can occur in Surefoot
#[derive(Debug, Error)]
pub enum SurefootError {
    /// No element matched the locator
    #[error("No such element: {locator}")]
    NoSuchElement {
        /// Locator or selector that failed to match
        locator: String,
    },

    /// Element reference no longer attached to the document
    #[error("Stale element reference: {element}")]
    StaleElement {
        /// Element id
        element: String,
    },

    /// Element exists but cannot receive input
    #[error("Element not interactable: {message}")]
    ElementNotInteractable {
        /// Error message
        message: String,
    },

    /// Another element would receive the click
    #[error("Element click intercepted: {message}")]
    ClickIntercepted {
        /// Error message
        message: String,
    },

    /// No user prompt is open
    #[error("No alert present")]
    NoAlertPresent,

    /// Frame could not be switched to
    #[error("No such frame: {frame}")]
    NoSuchFrame {
        /// Frame identifier
        frame: String,
    },

    /// Window handle unknown or index out of range
    #[error("No such window: {window}")]
    NoSuchWindow {
        /// Window handle or index
        window: String,
    },

    /// Locator was rejected by the browser
    #[error("Invalid selector {selector}: {message}")]
    InvalidSelector {
        /// Offending selector
        selector: String,
        /// Error message
        message: String,
    },

    /// Script raised inside the page
    #[error("Script error: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Transport-level failure talking to the driver
    #[error("Driver communication failed: {message}")]
    Communication {
        /// Error message
        message: String,
    },

    /// Any other error code reported by the remote end
    #[error("WebDriver error `{error}`: {message}")]
    Protocol {
        /// W3C error code
        error: String,
        /// Error message
        message: String,
    },

    /// Polling wait gave up
    #[error("Timed out after {}ms waiting for {description}", waited.as_millis())]
    Timeout {
        /// Time spent polling
        waited: Duration,
        /// What was waited for
        description: String,
    },

    /// Component is bound to the session, not to a single element
    #[error("Search context is not an element")]
    NotAnElement,

    /// Driver does not implement the capability
    #[error("Unsupported by this driver: {capability}")]
    Unsupported {
        /// Capability name
        capability: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Failure classes acted on by waits and retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Expected transient state, absorbed by polling
    NotReady,
    /// Click or input blocked by page state
    Obstruction,
    /// Session hiccup worth another attempt
    Transient,
    /// Overall deadline passed
    Timeout,
    /// Caller bug, never retried
    Usage,
    /// Anything else
    Other,
}

impl SurefootError {
    /// Create a no-such-element error
    #[must_use]
    pub fn no_such_element(locator: impl Into<String>) -> Self {
        Self::NoSuchElement {
            locator: locator.into(),
        }
    }

    /// Create a communication error
    #[must_use]
    pub fn communication(message: impl Into<String>) -> Self {
        Self::Communication {
            message: message.into(),
        }
    }

    /// Create an unsupported-capability error
    #[must_use]
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchElement { .. } | Self::StaleElement { .. } | Self::NoAlertPresent => {
                ErrorKind::NotReady
            }
            Self::ElementNotInteractable { .. } | Self::ClickIntercepted { .. } => {
                ErrorKind::Obstruction
            }
            Self::Communication { .. } => ErrorKind::Transient,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidSelector { .. }
            | Self::NotAnElement
            | Self::Unsupported { .. }
            | Self::Config { .. } => ErrorKind::Usage,
            Self::NoSuchFrame { .. }
            | Self::NoSuchWindow { .. }
            | Self::Script { .. }
            | Self::Protocol { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_) => ErrorKind::Other,
        }
    }

    /// Whether a polling wait should treat this as "not yet"
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotReady)
    }

    /// Whether a click retry loop may try again after this error
    #[must_use]
    pub const fn is_retryable_click(&self) -> bool {
        matches!(self, Self::StaleElement { .. })
            || matches!(self.kind(), ErrorKind::Obstruction | ErrorKind::Transient)
    }
}

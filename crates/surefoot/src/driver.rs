//! Driver - the browser session capability set Surefoot is built on.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Driver (trait)                                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────┐  ┌────────────────────┐              │
//! │  │  W3cDriver         │  │  MockDriver        │              │
//! │  │  (feature = "w3c") │  │  (unit tests)      │              │
//! │  │  HTTP to           │  │  scripted DOM and  │              │
//! │  │  chromedriver etc. │  │  frame tree        │              │
//! │  └────────────────────┘  └────────────────────┘              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait is blocking. Every wait in this crate polls on the calling
//! thread, and the implicit-wait value plus the current frame are state of
//! the session, so one session must not be driven from several threads
//! at once.

use crate::locator::Locator;
use crate::result::{SurefootError, SurefootResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Reference to a live DOM node in the current browsing context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Wrap a remote element id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Remote element id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can find child elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchContext {
    /// The whole document of the current frame
    Session,
    /// Descendants of an element
    Element(ElementHandle),
}

impl SearchContext {
    /// The element, if this context is one
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementHandle> {
        match self {
            Self::Session => None,
            Self::Element(el) => Some(el),
        }
    }
}

impl From<ElementHandle> for SearchContext {
    fn from(el: ElementHandle) -> Self {
        Self::Element(el)
    }
}

/// Frame to switch into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameTarget {
    /// Child frame whose `name` attribute equals
    Name(String),
    /// Child frame by position
    Index(u16),
    /// Frame element reference
    Element(ElementHandle),
}

impl fmt::Display for FrameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name={name}"),
            Self::Index(i) => write!(f, "index={i}"),
            Self::Element(el) => write!(f, "element={el}"),
        }
    }
}

/// Simulated network state (chromium only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConditions {
    /// Drop all traffic
    pub offline: bool,
    /// Added round-trip latency
    pub latency: Duration,
    /// Bytes per second, download
    pub download_throughput: u64,
    /// Bytes per second, upload
    pub upload_throughput: u64,
}

impl NetworkConditions {
    /// Disconnected network
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            offline: true,
            latency: Duration::from_millis(10),
            download_throughput: 0,
            upload_throughput: 0,
        }
    }

    /// Healthy 1 MB/s connection
    #[must_use]
    pub const fn online() -> Self {
        Self {
            offline: false,
            latency: Duration::ZERO,
            download_throughput: 1_000_000,
            upload_throughput: 1_000_000,
        }
    }
}

/// W3C key code points
pub mod keys {
    /// Backspace key
    pub const BACKSPACE: &str = "\u{E003}";
    /// End key
    pub const END: &str = "\u{E010}";
    /// Enter key
    pub const ENTER: &str = "\u{E007}";
    /// Tab key
    pub const TAB: &str = "\u{E004}";
}

/// Browser session capability set
///
/// # Implementations
///
/// - `W3cDriver` - HTTP client for any W3C remote end (feature `w3c`)
/// - `MockDriver` - scripted in-memory session for unit testing
pub trait Driver: Send + Sync {
    /// Navigate the current top-level browsing context
    fn navigate(&self, url: &str) -> SurefootResult<()>;

    /// Find all elements matching the locator within the context.
    ///
    /// Honors the session's implicit wait before returning an empty list.
    fn find_elements(
        &self,
        context: &SearchContext,
        locator: &Locator,
    ) -> SurefootResult<Vec<ElementHandle>>;

    /// Find the first matching element or fail with `NoSuchElement`
    fn find_element(
        &self,
        context: &SearchContext,
        locator: &Locator,
    ) -> SurefootResult<ElementHandle> {
        self.find_elements(context, locator)?
            .into_iter()
            .next()
            .ok_or_else(|| SurefootError::no_such_element(locator.to_string()))
    }

    /// Attribute value, `None` when absent
    fn attribute(&self, element: &ElementHandle, name: &str) -> SurefootResult<Option<String>>;

    /// Current value of a form control
    fn value(&self, element: &ElementHandle) -> SurefootResult<Option<String>> {
        self.attribute(element, "value")
    }

    /// Rendered text
    fn text(&self, element: &ElementHandle) -> SurefootResult<String>;

    /// Click the element
    fn click(&self, element: &ElementHandle) -> SurefootResult<()>;

    /// Type keys into the element
    fn send_keys(&self, element: &ElementHandle, keys: &str) -> SurefootResult<()>;

    /// Clear a form control
    fn clear(&self, element: &ElementHandle) -> SurefootResult<()>;

    /// Session implicit wait
    fn implicit_wait(&self) -> SurefootResult<Duration>;

    /// Replace the session implicit wait
    fn set_implicit_wait(&self, wait: Duration) -> SurefootResult<()>;

    /// Switch to a top-level window
    fn switch_to_window(&self, handle: &str) -> SurefootResult<()>;

    /// Switch into a child frame of the current context
    fn switch_to_frame(&self, target: &FrameTarget) -> SurefootResult<()>;

    /// Switch to the parent of the current frame
    fn switch_to_parent_frame(&self) -> SurefootResult<()>;

    /// Switch to the top-level document
    fn switch_to_default_content(&self) -> SurefootResult<()>;

    /// Focus the open alert, `NoAlertPresent` if there is none
    fn switch_to_alert(&self) -> SurefootResult<()>;

    /// All window handles in creation order
    fn window_handles(&self) -> SurefootResult<Vec<String>>;

    /// Run a synchronous script, returning its JSON result
    fn execute_script(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> SurefootResult<serde_json::Value>;

    /// Accept the open alert
    fn accept_alert(&self) -> SurefootResult<()>;

    /// Text of the open alert
    fn alert_text(&self) -> SurefootResult<String>;

    /// Move the pointer over the element
    fn move_to_element(&self, element: &ElementHandle) -> SurefootResult<()>;

    /// Throttle or cut the network
    fn set_network_conditions(&self, conditions: &NetworkConditions) -> SurefootResult<()> {
        let _ = conditions;
        Err(SurefootError::unsupported("network conditions"))
    }
}

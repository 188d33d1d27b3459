//! Surefoot: sure-footed browser automation over WebDriver
//!
//! A synchronization layer for flaky pages: polling waits, recursive frame
//! search with scoped implicit waits, retrying clicks and text entry, and
//! page components that re-find their element on every access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    SUREFOOT Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ WebPage /  │    │ SessionExt │    │ Driver     │            │
//! │   │ Page       │───►│ Wait       │───►│ (W3C HTTP  │            │
//! │   │ Component  │    │ FrameSearch│    │  or mock)  │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```
//! use surefoot::mock::MockDriver;
//! use surefoot::prelude::*;
//!
//! let driver = MockDriver::new();
//! let (_, body) = driver.add_frame(driver.root(), Some("body"));
//! let _ = driver.add_frame(body, Some("content"));
//!
//! assert!(driver.switch_to_frame_named("content").unwrap());
//! assert_eq!(driver.frame_path().len(), 3);
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
mod component;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod config;
#[allow(clippy::missing_errors_doc)]
mod driver;
#[allow(clippy::missing_errors_doc)]
mod frame;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod implicit;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod interact;
mod locator;
#[allow(clippy::missing_errors_doc)]
mod page;
mod result;
#[allow(clippy::missing_errors_doc)]
mod session;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
mod wait;

/// W3C WebDriver HTTP adapter
#[cfg(feature = "w3c")]
#[allow(clippy::missing_errors_doc, clippy::doc_markdown)]
mod w3c;

/// Mock driver for testing page logic without a browser
///
/// Scripted DOM, frame tree, failure queues and a call log.
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_panics_doc
)]
pub mod mock;

pub use component::{Binding, PageComponent};
pub use config::SurefootConfig;
pub use driver::{keys, Driver, ElementHandle, FrameTarget, NetworkConditions, SearchContext};
pub use frame::{switch_to_frame, FrameSearch, NamelessFrames, DEFAULT_PROBE_WAIT_MS};
pub use implicit::ImplicitWaitGuard;
pub use interact::{
    attempt_click, clear_with_backspace, enter_text_try_hard, find_all_css, find_element_within,
    patient_click, set_value, ClickOutcome, Lookup, RetryPolicy, DEFAULT_CLICK_INTERVAL_MS,
    DEFAULT_CLICK_MAX_TRIES, DEFAULT_TEXT_MAX_RETRIES,
};
pub use locator::{Locator, Strategy};
pub use page::{Page, WebPage};
pub use result::{ErrorKind, SurefootError, SurefootResult};
pub use session::SessionExt;
#[cfg(feature = "w3c")]
pub use w3c::{W3cDriver, ELEMENT_KEY};
pub use wait::{
    ReadyState, Wait, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
    READY_STATE_SCRIPT,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::component::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::frame::{FrameSearch, NamelessFrames};
    pub use super::implicit::*;
    pub use super::interact::*;
    pub use super::locator::*;
    pub use super::page::*;
    pub use super::result::*;
    pub use super::session::*;
    #[cfg(feature = "w3c")]
    pub use super::w3c::*;
    pub use super::wait::*;
}

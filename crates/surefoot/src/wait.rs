//! Polling waits.
//!
//! A [`Wait`] re-evaluates a condition against the driver at a fixed
//! interval until it yields a value or the timeout passes. Conditions may
//! fail with "not ready yet" errors (`NoSuchElement`, `StaleElement`,
//! `NoAlertPresent`); those count as a negative result. Any other error
//! ends the wait immediately and is returned unchanged.
//!
//! Timeouts are cooperative: the deadline is checked between polls, and the
//! condition always runs at least once.

use crate::driver::Driver;
use crate::result::{SurefootError, SurefootResult};
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (50 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 50_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Script used to read the document ready state
pub const READY_STATE_SCRIPT: &str = "return document.readyState";

// =============================================================================
// READY STATE
// =============================================================================

/// `document.readyState` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyState {
    /// Document still loading
    Loading,
    /// Parsed, subresources pending
    Interactive,
    /// Fully loaded
    Complete,
}

impl ReadyState {
    /// Parse the value reported by the browser
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loading" => Some(Self::Loading),
            "interactive" => Some(Self::Interactive),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }

    /// Value as reported by the browser
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Interactive => "interactive",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT
// =============================================================================

/// Polling wait bound to a driver
#[derive(Debug)]
pub struct Wait<'d, D: Driver + ?Sized> {
    driver: &'d D,
    options: WaitOptions,
    message: Option<String>,
}

impl<'d, D: Driver + ?Sized> Wait<'d, D> {
    /// Create a wait with explicit options
    pub const fn new(driver: &'d D, options: WaitOptions) -> Self {
        Self {
            driver,
            options,
            message: None,
        }
    }

    /// Describe what is awaited, used in the timeout error
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Options in effect
    pub const fn options(&self) -> WaitOptions {
        self.options
    }

    /// Poll until the condition yields a value
    pub fn until<T, F>(&self, mut condition: F) -> SurefootResult<T>
    where
        F: FnMut(&D) -> SurefootResult<Option<T>>,
    {
        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();
        let mut last_not_ready: Option<SurefootError> = None;
        let mut polls: u32 = 0;

        loop {
            polls += 1;
            match condition(self.driver) {
                Ok(Some(value)) => {
                    tracing::trace!(polls, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
                    return Ok(value);
                }
                Ok(None) => last_not_ready = None,
                Err(err) if err.is_not_ready() => last_not_ready = Some(err),
                Err(err) => return Err(err),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(self.timeout_error(elapsed, last_not_ready));
            }
            std::thread::sleep(poll_interval.min(timeout - elapsed));
        }
    }

    /// Poll until the condition returns `true`
    pub fn until_true<F>(&self, mut condition: F) -> SurefootResult<()>
    where
        F: FnMut(&D) -> SurefootResult<bool>,
    {
        self.until(|driver| condition(driver).map(|ok| ok.then_some(())))
    }

    fn timeout_error(&self, waited: Duration, last: Option<SurefootError>) -> SurefootError {
        let what = self.message.as_deref().unwrap_or("condition");
        let description = match last {
            Some(err) => format!("{what} (last error: {err})"),
            None => what.to_string(),
        };
        SurefootError::Timeout {
            waited,
            description,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::locator::Locator;
    use crate::mock::{MockDriver, MockElement, MockFailure};
    use crate::SearchContext;
    use std::cell::Cell;

    fn fast() -> WaitOptions {
        WaitOptions::new().with_timeout(200).with_poll_interval(5)
    }

    mod ready_state_tests {
        use super::*;

        #[test]
        fn test_parse() {
            assert_eq!(ReadyState::parse("complete"), Some(ReadyState::Complete));
            assert_eq!(ReadyState::parse("loading"), Some(ReadyState::Loading));
            assert_eq!(ReadyState::parse("bogus"), None);
        }

        #[test]
        fn test_display() {
            assert_eq!(ReadyState::Interactive.to_string(), "interactive");
        }
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_wait_options_default() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, 50_000);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_wait_options_chained() {
            let opts = WaitOptions::new().with_timeout(10_000).with_poll_interval(200);
            assert_eq!(opts.timeout(), Duration::from_secs(10));
            assert_eq!(opts.poll_interval(), Duration::from_millis(200));
        }
    }

    mod until_tests {
        use super::*;

        #[test]
        fn test_returns_value_when_condition_yields() {
            let driver = MockDriver::new();
            let calls = Cell::new(0);
            let value = Wait::new(&driver, fast())
                .until(|_| {
                    calls.set(calls.get() + 1);
                    Ok((calls.get() == 3).then_some("ready"))
                })
                .unwrap();
            assert_eq!(value, "ready");
            assert_eq!(calls.get(), 3);
        }

        #[test]
        fn test_times_out() {
            let driver = MockDriver::new();
            let start = Instant::now();
            let err = Wait::new(&driver, WaitOptions::new().with_timeout(50).with_poll_interval(10))
                .with_message("never")
                .until_true(|_| Ok(false))
                .unwrap_err();
            assert!(start.elapsed() >= Duration::from_millis(50));
            match err {
                SurefootError::Timeout { description, .. } => assert_eq!(description, "never"),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_zero_timeout_evaluates_once() {
            let driver = MockDriver::new();
            let calls = Cell::new(0);
            let result = Wait::new(&driver, WaitOptions::new().with_timeout(0)).until_true(|_| {
                calls.set(calls.get() + 1);
                Ok(true)
            });
            assert!(result.is_ok());
            assert_eq!(calls.get(), 1);
        }

        #[test]
        fn test_not_ready_errors_are_absorbed() {
            let driver = MockDriver::new();
            driver.fail_finds([MockFailure::NotFound, MockFailure::Stale]);
            let el = driver.add_element(driver.root(), MockElement::new("button"));
            let found = Wait::new(&driver, fast())
                .until(|d| {
                    let all = d.find_elements(&SearchContext::Session, &Locator::tag_name("button"))?;
                    Ok(all.into_iter().next())
                })
                .unwrap();
            assert_eq!(found, el);
            assert_eq!(driver.call_count("find_elements"), 3);
        }

        #[test]
        fn test_other_errors_propagate_immediately() {
            let driver = MockDriver::new();
            driver.fail_finds([MockFailure::InvalidSelector]);
            let calls = Cell::new(0);
            let err = Wait::new(&driver, fast())
                .until(|d| {
                    calls.set(calls.get() + 1);
                    d.find_element(&SearchContext::Session, &Locator::css("!!")).map(Some)
                })
                .unwrap_err();
            assert!(matches!(err, SurefootError::InvalidSelector { .. }));
            assert_eq!(calls.get(), 1);
        }

        #[test]
        fn test_timeout_mentions_last_not_ready_error() {
            let driver = MockDriver::new();
            let err = Wait::new(&driver, WaitOptions::new().with_timeout(20).with_poll_interval(5))
                .until(|d| d.find_element(&SearchContext::Session, &Locator::id("ghost")).map(Some))
                .unwrap_err();
            assert!(err.to_string().contains("last error: No such element"));
        }

        #[test]
        fn test_succeeds_within_timeout_when_condition_turns_true_late() {
            let driver = MockDriver::new();
            let start = Instant::now();
            Wait::new(&driver, WaitOptions::new().with_timeout(300).with_poll_interval(10))
                .until_true(|_| Ok(start.elapsed() >= Duration::from_millis(100)))
                .unwrap();
        }
    }
}

//! Resilient element interaction.
//!
//! Helpers for pages that fight back: clicks that land on an overlay,
//! inputs whose scripts eat keystrokes, fields that ignore `clear`, and
//! optional sub-elements that should be looked up without waiting.

use crate::driver::{keys, Driver, ElementHandle, SearchContext};
use crate::implicit::ImplicitWaitGuard;
use crate::locator::Locator;
use crate::result::{SurefootError, SurefootResult};
use crate::wait::{Wait, WaitOptions};
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Click attempts made by [`patient_click`] by default
pub const DEFAULT_CLICK_MAX_TRIES: u32 = 5;

/// Pause between click attempts (500ms)
pub const DEFAULT_CLICK_INTERVAL_MS: u64 = 500;

/// Attempts made by [`enter_text_try_hard`] by default
pub const DEFAULT_TEXT_MAX_RETRIES: u32 = 10;

// =============================================================================
// CLICKING
// =============================================================================

/// Result of a single click attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was delivered
    Clicked,
    /// Another element would receive the click
    Intercepted,
    /// The element cannot be clicked right now (hidden, zero size, disabled)
    NotInteractable,
}

impl ClickOutcome {
    /// Whether the click was delivered
    #[must_use]
    pub const fn is_clicked(&self) -> bool {
        matches!(self, Self::Clicked)
    }
}

/// Click once, turning obstruction errors into an outcome.
///
/// Every other failure, stale references included, is returned as an error.
pub fn attempt_click<D: Driver + ?Sized>(
    driver: &D,
    element: &ElementHandle,
) -> SurefootResult<ClickOutcome> {
    match driver.click(element) {
        Ok(()) => Ok(ClickOutcome::Clicked),
        Err(SurefootError::ClickIntercepted { message }) => {
            tracing::debug!(element = %element, %message, "click intercepted");
            Ok(ClickOutcome::Intercepted)
        }
        Err(SurefootError::ElementNotInteractable { message }) => {
            tracing::debug!(element = %element, %message, "element not interactable");
            Ok(ClickOutcome::NotInteractable)
        }
        Err(err) => Err(err),
    }
}

/// How often and how fast to retry a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_tries: u32,
    /// Pause between attempts
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_CLICK_MAX_TRIES,
            interval: Duration::from_millis(DEFAULT_CLICK_INTERVAL_MS),
        }
    }
}

impl RetryPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(max_tries: u32, interval: Duration) -> Self {
        Self {
            max_tries,
            interval,
        }
    }

    /// Set the number of attempts
    #[must_use]
    pub const fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Set the pause between attempts
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Click until it goes through or the attempts run out.
///
/// Obstructed clicks, stale references and dropped connections are retried;
/// anything else is returned as an error. Returns `false` when every
/// attempt failed.
pub fn patient_click<D: Driver + ?Sized>(
    driver: &D,
    element: &ElementHandle,
    policy: &RetryPolicy,
) -> SurefootResult<bool> {
    for attempt in 1..=policy.max_tries {
        match attempt_click(driver, element) {
            Ok(ClickOutcome::Clicked) => {
                tracing::debug!(element = %element, attempt, "clicked");
                return Ok(true);
            }
            Ok(outcome) => {
                tracing::debug!(element = %element, attempt, ?outcome, "click attempt failed");
            }
            Err(err) if err.is_retryable_click() => {
                tracing::debug!(element = %element, attempt, error = %err, "click attempt failed");
            }
            Err(err) => return Err(err),
        }
        if attempt < policy.max_tries {
            std::thread::sleep(policy.interval);
        }
    }

    tracing::warn!(element = %element, tries = policy.max_tries, "giving up on click");
    Ok(false)
}

// =============================================================================
// TEXT ENTRY
// =============================================================================

/// Clear and type `text` until the field's value reads back identical.
///
/// Makes at most `max_retries` attempts, with no pause between them.
pub fn enter_text_try_hard<D: Driver + ?Sized>(
    driver: &D,
    element: &ElementHandle,
    text: &str,
    max_retries: u32,
) -> SurefootResult<bool> {
    for attempt in 1..=max_retries {
        driver.clear(element)?;
        driver.send_keys(element, text)?;
        let value = driver.value(element)?;
        if value.as_deref() == Some(text) {
            tracing::debug!(element = %element, attempt, "text accepted");
            return Ok(true);
        }
        tracing::debug!(element = %element, attempt, got = ?value, "text mismatch");
    }
    Ok(false)
}

/// Empty a field one backspace at a time.
///
/// Moves the caret to the end, then sends a backspace on every poll until
/// both the rendered text and the value are empty.
pub fn clear_with_backspace<D: Driver + ?Sized>(
    driver: &D,
    element: &ElementHandle,
    options: &WaitOptions,
) -> SurefootResult<()> {
    driver.send_keys(element, keys::END)?;
    Wait::new(driver, *options)
        .with_message(format!("{element} to be empty"))
        .until_true(|d| {
            d.send_keys(element, keys::BACKSPACE)?;
            let text = d.text(element)?;
            let value = d.value(element)?.unwrap_or_default();
            Ok(text.is_empty() && value.is_empty())
        })
}

/// Replace a field's content. `None` leaves the field untouched.
pub fn set_value<D: Driver + ?Sized>(
    driver: &D,
    element: &ElementHandle,
    value: Option<&str>,
    options: &WaitOptions,
) -> SurefootResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    clear_with_backspace(driver, element, options)?;
    driver.send_keys(element, value)
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Outcome of a lookup that must not wait
#[derive(Debug)]
pub enum Lookup {
    /// First matching element
    Found(ElementHandle),
    /// Nothing matched
    Missing,
    /// The lookup itself failed
    Failed(SurefootError),
}

impl Lookup {
    /// Whether an element was found
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The element, treating failures like a miss
    #[must_use]
    pub fn into_option(self) -> Option<ElementHandle> {
        match self {
            Self::Found(element) => Some(element),
            Self::Missing | Self::Failed(_) => None,
        }
    }

    /// The element, keeping failures as errors
    pub fn into_result(self) -> SurefootResult<Option<ElementHandle>> {
        match self {
            Self::Found(element) => Ok(Some(element)),
            Self::Missing => Ok(None),
            Self::Failed(err) => Err(err),
        }
    }
}

/// Find the first element matching `css` under `context` with the implicit
/// wait lowered to `timeout` for the duration of the lookup.
pub fn find_element_within<D: Driver + ?Sized>(
    driver: &D,
    context: &SearchContext,
    css: &str,
    timeout: Duration,
) -> Lookup {
    let guard = match ImplicitWaitGuard::new(driver, timeout) {
        Ok(guard) => guard,
        Err(err) => return Lookup::Failed(err),
    };
    let found = driver.find_elements(context, &Locator::css(css));
    if let Err(err) = guard.restore() {
        return Lookup::Failed(err);
    }

    match found {
        Ok(elements) => elements.into_iter().next().map_or(Lookup::Missing, Lookup::Found),
        Err(err) if err.is_not_ready() => Lookup::Missing,
        Err(err) => {
            tracing::debug!(css, error = %err, "lookup failed");
            Lookup::Failed(err)
        }
    }
}

/// All elements matching `css` under `context`
pub fn find_all_css<D: Driver + ?Sized>(
    driver: &D,
    context: &SearchContext,
    css: &str,
) -> SurefootResult<Vec<ElementHandle>> {
    driver.find_elements(context, &Locator::css(css))
}

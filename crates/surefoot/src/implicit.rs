//! Scoped implicit-wait overrides.
//!
//! The implicit wait is session state shared by every find command. An
//! override is held by an [`ImplicitWaitGuard`]: it records the value in
//! effect before the override and puts it back exactly once, either through
//! [`ImplicitWaitGuard::restore`] or when the guard is dropped (early
//! return, `?`, panic unwinding).

use crate::driver::Driver;
use crate::result::SurefootResult;
use std::time::Duration;

/// Restores the saved implicit wait when released
#[derive(Debug)]
#[must_use = "the override is undone as soon as the guard is dropped"]
pub struct ImplicitWaitGuard<'d, D: Driver + ?Sized> {
    driver: &'d D,
    saved: Duration,
    armed: bool,
}

impl<'d, D: Driver + ?Sized> ImplicitWaitGuard<'d, D> {
    /// Save the current implicit wait, then apply `wait`
    pub fn new(driver: &'d D, wait: Duration) -> SurefootResult<Self> {
        let saved = driver.implicit_wait()?;
        driver.set_implicit_wait(wait)?;
        Ok(Self {
            driver,
            saved,
            armed: true,
        })
    }

    /// Value that will be restored
    pub const fn saved(&self) -> Duration {
        self.saved
    }

    /// Restore now and report failure to the caller
    pub fn restore(mut self) -> SurefootResult<()> {
        self.armed = false;
        self.driver.set_implicit_wait(self.saved)
    }
}

impl<D: Driver + ?Sized> Drop for ImplicitWaitGuard<'_, D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Err(err) = self.driver.set_implicit_wait(self.saved) {
            tracing::warn!(
                saved_ms = self.saved.as_millis() as u64,
                error = %err,
                "failed to restore implicit wait"
            );
        }
    }
}

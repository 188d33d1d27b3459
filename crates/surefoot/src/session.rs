//! Session-level helpers available on every [`Driver`].
//!
//! ```
//! use surefoot::mock::MockDriver;
//! use surefoot::SessionExt;
//! use std::time::Duration;
//!
//! let driver = MockDriver::new();
//! driver.open_alert("Saved!");
//! assert_eq!(driver.wait_for_alert(Duration::from_secs(1)).unwrap(), "Saved!");
//! ```

use crate::driver::{Driver, ElementHandle, NetworkConditions};
use crate::frame::FrameSearch;
use crate::implicit::ImplicitWaitGuard;
use crate::result::{SurefootError, SurefootResult};
use crate::wait::{ReadyState, Wait, WaitOptions, READY_STATE_SCRIPT};
use std::time::Duration;

/// Waiting, alert, frame and window helpers
pub trait SessionExt: Driver {
    /// Wait with default options (50s timeout, 500ms polling)
    fn wait(&self) -> Wait<'_, Self> {
        Wait::new(self, WaitOptions::default())
    }

    /// Wait with the given timeout and default polling
    fn waiter(&self, timeout: Duration) -> Wait<'_, Self> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        Wait::new(self, WaitOptions::new().with_timeout(timeout_ms))
    }

    /// Probe for an open alert without waiting.
    ///
    /// On `true` the session is left focused on the alert.
    fn is_alert_present(&self) -> SurefootResult<bool> {
        match self.switch_to_alert() {
            Ok(()) => Ok(true),
            Err(SurefootError::NoAlertPresent) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Wait for an alert, then return its text
    fn wait_for_alert(&self, timeout: Duration) -> SurefootResult<String> {
        self.waiter(timeout)
            .with_message("alert to be present")
            .until_true(|d| d.is_alert_present())?;
        self.alert_text()
    }

    /// Wait for an alert, then accept it
    fn wait_for_alert_and_accept(&self, timeout: Duration) -> SurefootResult<()> {
        self.waiter(timeout)
            .with_message("alert to be present")
            .until_true(|d| d.is_alert_present())?;
        self.accept_alert()
    }

    /// Wait until `document.readyState` is `complete`
    fn wait_for_page_loaded(&self) -> SurefootResult<()> {
        self.wait()
            .with_message("document.readyState to be complete")
            .until_true(|d| {
                let state = d.execute_script(READY_STATE_SCRIPT, Vec::new())?;
                Ok(state.as_str().and_then(ReadyState::parse) == Some(ReadyState::Complete))
            })
    }

    /// Move the pointer over the element, retrying until an attempt succeeds
    fn hover_over_element(&self, element: &ElementHandle) -> SurefootResult<()> {
        self.wait()
            .with_message(format!("hover over {element}"))
            .until_true(|d| match d.move_to_element(element) {
                Ok(()) => Ok(true),
                Err(err) => {
                    tracing::trace!(element = %element, error = %err, "hover attempt failed");
                    Ok(false)
                }
            })
    }

    /// Run a script and return its value
    fn execute_javascript(&self, script: &str) -> SurefootResult<serde_json::Value> {
        self.execute_script(script, Vec::new())
    }

    /// Switch to the window at `index` in handle order
    fn switch_to_window_index(&self, index: usize) -> SurefootResult<()> {
        let handles = self.window_handles()?;
        let handle = handles.get(index).ok_or_else(|| SurefootError::NoSuchWindow {
            window: format!("#{index} of {}", handles.len()),
        })?;
        self.switch_to_window(handle)
    }

    /// Find a frame by name anywhere in the frame tree and switch into it
    fn switch_to_frame_named(&self, frame_name: &str) -> SurefootResult<bool> {
        FrameSearch::default().search(self, frame_name)
    }

    /// Override the implicit wait until the returned guard is dropped
    fn override_implicit_wait(&self, wait: Duration) -> SurefootResult<ImplicitWaitGuard<'_, Self>> {
        ImplicitWaitGuard::new(self, wait)
    }

    /// `value` of a form control
    fn element_value(&self, element: &ElementHandle) -> SurefootResult<Option<String>> {
        self.value(element)
    }

    /// Cut the network (chromium only)
    fn go_offline(&self) -> SurefootResult<()> {
        self.set_network_conditions(&NetworkConditions::offline())
    }

    /// Restore the network after [`SessionExt::go_offline`]
    fn go_online(&self) -> SurefootResult<()> {
        self.set_network_conditions(&NetworkConditions::online())
    }
}

impl<D: Driver + ?Sized> SessionExt for D {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};
    use serde_json::json;

    mod alert_tests {
        use super::*;

        #[test]
        fn test_is_alert_present() {
            let driver = MockDriver::new();
            assert!(!driver.is_alert_present().unwrap());
            driver.open_alert("hello");
            assert!(driver.is_alert_present().unwrap());
        }

        #[test]
        fn test_wait_for_alert_polls_until_open() {
            let driver = MockDriver::new();
            driver.open_alert_after(3, "Are you sure?");
            let text = Wait::new(&driver, WaitOptions::new().with_timeout(1_000).with_poll_interval(1))
                .until_true(|d| d.is_alert_present())
                .and_then(|()| driver.alert_text())
                .unwrap();
            assert_eq!(text, "Are you sure?");
            assert_eq!(driver.call_count("switch_to_alert"), 4);
        }

        #[test]
        fn test_wait_for_alert_and_accept() {
            let driver = MockDriver::new();
            driver.open_alert("Done");
            driver.wait_for_alert_and_accept(Duration::from_secs(1)).unwrap();
            assert!(!driver.alert_open());
        }

        #[test]
        fn test_wait_for_alert_times_out() {
            let driver = MockDriver::new();
            let err = driver.wait_for_alert(Duration::ZERO).unwrap_err();
            assert!(matches!(err, SurefootError::Timeout { .. }));
        }
    }

    mod page_load_tests {
        use super::*;

        #[test]
        fn test_ready_immediately() {
            let driver = MockDriver::new();
            driver.push_script_results([json!("complete")]);
            driver.wait_for_page_loaded().unwrap();
            assert_eq!(driver.call_count("execute_script:return document.readyState"), 1);
        }

        #[test]
        fn test_null_ready_state_never_completes() {
            let driver = MockDriver::new();
            driver.push_script_results([json!(null)]);
            let err = driver
                .waiter(Duration::ZERO)
                .until_true(|d| {
                    let state = d.execute_javascript(READY_STATE_SCRIPT)?;
                    Ok(state == "complete")
                })
                .unwrap_err();
            assert!(matches!(err, SurefootError::Timeout { .. }));
        }
    }

    mod hover_tests {
        use super::*;

        #[test]
        fn test_hover_retries_failed_moves() {
            let driver = MockDriver::new();
            let menu = driver.add_element(driver.root(), MockElement::new("li"));
            driver.fail_hovers(&menu, 2);
            let result = Wait::new(&driver, WaitOptions::new().with_timeout(500).with_poll_interval(1))
                .until_true(|d| Ok(d.move_to_element(&menu).is_ok()));
            assert!(result.is_ok());
            assert_eq!(driver.call_count("move_to_element"), 3);
        }

        #[test]
        fn test_hover_over_element_recovers() {
            let driver = MockDriver::new();
            let menu = driver.add_element(driver.root(), MockElement::new("li"));
            driver.fail_hovers(&menu, 1);
            driver.hover_over_element(&menu).unwrap();
            assert_eq!(driver.call_count("move_to_element"), 2);
        }

        #[test]
        fn test_hover_immediate_success() {
            let driver = MockDriver::new();
            let menu = driver.add_element(driver.root(), MockElement::new("li"));
            driver.hover_over_element(&menu).unwrap();
            assert_eq!(driver.call_count("move_to_element"), 1);
        }
    }

    mod window_tests {
        use super::*;

        #[test]
        fn test_switch_to_window_index() {
            let driver = MockDriver::new();
            driver.add_window("popup");
            driver.switch_to_window_index(1).unwrap();
            assert_eq!(driver.current_window(), "popup");
        }

        #[test]
        fn test_switch_to_window_index_out_of_range() {
            let driver = MockDriver::new();
            let err = driver.switch_to_window_index(3).unwrap_err();
            assert!(matches!(err, SurefootError::NoSuchWindow { .. }));
        }
    }

    mod misc_tests {
        use super::*;

        #[test]
        fn test_override_implicit_wait_guard() {
            let driver = MockDriver::new();
            driver.preset_implicit_wait(Duration::from_secs(9));
            {
                let _guard = driver.override_implicit_wait(Duration::ZERO).unwrap();
                assert_eq!(driver.implicit_wait().unwrap(), Duration::ZERO);
            }
            assert_eq!(driver.implicit_wait().unwrap(), Duration::from_secs(9));
        }

        #[test]
        fn test_network_toggles() {
            let driver = MockDriver::new();
            driver.go_offline().unwrap();
            assert!(driver.network_conditions().unwrap().offline);
            driver.go_online().unwrap();
            assert!(!driver.network_conditions().unwrap().offline);
        }

        #[test]
        fn test_switch_to_frame_named() {
            let driver = MockDriver::new();
            let _ = driver.add_frame(driver.root(), Some("content"));
            assert!(driver.switch_to_frame_named("content").unwrap());
        }

        #[test]
        fn test_element_value() {
            let driver = MockDriver::new();
            let el = driver.add_element(
                driver.root(),
                MockElement::new("input").with_attribute("value", "preset"),
            );
            assert_eq!(driver.element_value(&el).unwrap().as_deref(), Some("preset"));
        }
    }
}

//! Subcommand handlers.
//!
//! Handlers take any [`Driver`] and an output sink so they run the same
//! against a live session and against the mock driver.

use crate::commands::{AlertArgs, FrameArgs, WaitLoadArgs};
use crate::error::CliResult;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use surefoot::{
    Driver, ReadyState, SessionExt, SurefootConfig, SurefootError, Wait, READY_STATE_SCRIPT,
};

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked
    Done,
    /// The frame or alert looked for does not exist
    NotFound,
}

impl Outcome {
    /// Process exit code (0 or 2)
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::NotFound => ExitCode::from(2),
        }
    }
}

fn open_url<D: Driver + ?Sized>(driver: &D, url: Option<&str>) -> CliResult<()> {
    if let Some(url) = url {
        tracing::info!(url, "navigating");
        driver.navigate(url)?;
    }
    Ok(())
}

/// Search the frame tree and report where the session ended up
pub fn frame<D: Driver + ?Sized>(
    driver: &D,
    config: &SurefootConfig,
    args: &FrameArgs,
    out: &mut impl Write,
) -> CliResult<Outcome> {
    open_url(driver, args.url.as_deref())?;
    let mut search = config.frame_search();
    if args.iframes {
        search = search.with_iframes(true);
    }
    if search.search(driver, &args.name)? {
        writeln!(out, "found frame {}", args.name)?;
        Ok(Outcome::Done)
    } else {
        writeln!(out, "frame {} not found", args.name)?;
        Ok(Outcome::NotFound)
    }
}

/// Block until the document has finished loading
pub fn wait_load<D: Driver + ?Sized>(
    driver: &D,
    config: &SurefootConfig,
    args: &WaitLoadArgs,
    out: &mut impl Write,
) -> CliResult<Outcome> {
    open_url(driver, args.url.as_deref())?;
    Wait::new(driver, config.wait_options())
        .with_message("document.readyState to be complete")
        .until_true(|d| {
            let state = d.execute_script(READY_STATE_SCRIPT, Vec::new())?;
            Ok(state.as_str().and_then(ReadyState::parse) == Some(ReadyState::Complete))
        })?;
    writeln!(out, "page loaded")?;
    Ok(Outcome::Done)
}

/// Wait for an alert, print its text and optionally accept it
pub fn alert<D: Driver + ?Sized>(
    driver: &D,
    args: &AlertArgs,
    out: &mut impl Write,
) -> CliResult<Outcome> {
    let text = match driver.wait_for_alert(Duration::from_secs(args.timeout)) {
        Ok(text) => text,
        Err(SurefootError::Timeout { .. }) => {
            writeln!(out, "no alert after {}s", args.timeout)?;
            return Ok(Outcome::NotFound);
        }
        Err(err) => return Err(err.into()),
    };
    writeln!(out, "{text}")?;
    if args.accept {
        driver.accept_alert()?;
        tracing::debug!("alert accepted");
    }
    Ok(Outcome::Done)
}

/// Print every window handle, one per line
pub fn windows<D: Driver + ?Sized>(driver: &D, out: &mut impl Write) -> CliResult<Outcome> {
    for handle in driver.window_handles()? {
        writeln!(out, "{handle}")?;
    }
    Ok(Outcome::Done)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use surefoot::mock::MockDriver;

    fn fast_config() -> SurefootConfig {
        SurefootConfig::from_yaml_str("wait_timeout_ms: 200\npoll_interval_ms: 1").unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    mod frame_tests {
        use super::*;

        #[test]
        fn test_found() {
            let driver = MockDriver::new();
            let _ = driver.add_frame(driver.root(), Some("content"));
            let args = FrameArgs {
                name: "content".into(),
                url: Some("https://example.test/".into()),
                iframes: false,
            };
            let mut out = Vec::new();
            let outcome = frame(&driver, &fast_config(), &args, &mut out).unwrap();
            assert_eq!(outcome, Outcome::Done);
            assert_eq!(output(out), "found frame content\n");
            assert_eq!(driver.current_url(), "https://example.test/");
        }

        #[test]
        fn test_iframe_flag() {
            let driver = MockDriver::new();
            let _ = driver.add_iframe(driver.root(), Some("embed"));
            let mut args = FrameArgs {
                name: "embed".into(),
                url: None,
                iframes: false,
            };
            let mut out = Vec::new();
            assert_eq!(
                frame(&driver, &fast_config(), &args, &mut out).unwrap(),
                Outcome::NotFound
            );
            args.iframes = true;
            assert_eq!(
                frame(&driver, &fast_config(), &args, &mut out).unwrap(),
                Outcome::Done
            );
        }
    }

    mod wait_load_tests {
        use super::*;

        #[test]
        fn test_waits_for_complete() {
            let driver = MockDriver::new();
            driver.push_script_results([
                serde_json::json!("loading"),
                serde_json::json!("interactive"),
                serde_json::json!("complete"),
            ]);
            let mut out = Vec::new();
            let outcome = wait_load(&driver, &fast_config(), &WaitLoadArgs { url: None }, &mut out).unwrap();
            assert_eq!(outcome, Outcome::Done);
            assert_eq!(driver.call_count("execute_script"), 3);
        }

        #[test]
        fn test_times_out() {
            let driver = MockDriver::new();
            driver.push_script_results([serde_json::json!("loading")]);
            let mut out = Vec::new();
            let err = wait_load(&driver, &fast_config(), &WaitLoadArgs { url: None }, &mut out).unwrap_err();
            assert!(err.to_string().contains("Timed out"));
        }
    }

    mod alert_tests {
        use super::*;

        #[test]
        fn test_prints_and_accepts() {
            let driver = MockDriver::new();
            driver.open_alert("Saved");
            let mut out = Vec::new();
            let args = AlertArgs {
                accept: true,
                timeout: 1,
            };
            assert_eq!(alert(&driver, &args, &mut out).unwrap(), Outcome::Done);
            assert_eq!(output(out), "Saved\n");
            assert!(!driver.alert_open());
        }

        #[test]
        fn test_no_alert_is_not_found() {
            let driver = MockDriver::new();
            let mut out = Vec::new();
            let args = AlertArgs {
                accept: false,
                timeout: 0,
            };
            assert_eq!(alert(&driver, &args, &mut out).unwrap(), Outcome::NotFound);
        }
    }

    #[test]
    fn test_windows_lists_handles() {
        let driver = MockDriver::new();
        driver.add_window("popup");
        let mut out = Vec::new();
        windows(&driver, &mut out).unwrap();
        assert_eq!(output(out), "window-0\npopup\n");
    }
}

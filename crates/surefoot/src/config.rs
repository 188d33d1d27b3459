//! Timing and search settings, loadable from YAML.
//!
//! ```yaml
//! wait_timeout_ms: 20000
//! poll_interval_ms: 250
//! include_iframes: true
//! ```
//!
//! Missing fields take their defaults.

use crate::frame::{FrameSearch, NamelessFrames, DEFAULT_PROBE_WAIT_MS};
use crate::interact::{
    RetryPolicy, DEFAULT_CLICK_INTERVAL_MS, DEFAULT_CLICK_MAX_TRIES, DEFAULT_TEXT_MAX_RETRIES,
};
use crate::result::{SurefootError, SurefootResult};
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Surefoot settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurefootConfig {
    /// Explicit wait timeout
    pub wait_timeout_ms: u64,
    /// Delay between polls
    pub poll_interval_ms: u64,
    /// Implicit wait while probing each frame level
    pub frame_probe_ms: u64,
    /// Search `<iframe>` elements too
    pub include_iframes: bool,
    /// Walk into frames that have no name
    pub descend_nameless_frames: bool,
    /// Click attempts
    pub click_max_tries: u32,
    /// Pause between click attempts
    pub click_interval_ms: u64,
    /// Attempts to make typed text stick
    pub text_max_retries: u32,
}

impl Default for SurefootConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            frame_probe_ms: DEFAULT_PROBE_WAIT_MS,
            include_iframes: false,
            descend_nameless_frames: false,
            click_max_tries: DEFAULT_CLICK_MAX_TRIES,
            click_interval_ms: DEFAULT_CLICK_INTERVAL_MS,
            text_max_retries: DEFAULT_TEXT_MAX_RETRIES,
        }
    }
}

impl SurefootConfig {
    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> SurefootResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> SurefootResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_yaml_str(&yaml)
    }

    fn validate(&self) -> SurefootResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(SurefootError::config("poll_interval_ms must be greater than 0"));
        }
        if self.click_max_tries == 0 {
            return Err(SurefootError::config("click_max_tries must be at least 1"));
        }
        if self.text_max_retries == 0 {
            return Err(SurefootError::config("text_max_retries must be at least 1"));
        }
        Ok(())
    }

    /// Explicit wait settings
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.wait_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Click retry settings
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.click_max_tries, Duration::from_millis(self.click_interval_ms))
    }

    /// Frame search settings
    #[must_use]
    pub const fn frame_search(&self) -> FrameSearch {
        FrameSearch {
            probe_wait: Duration::from_millis(self.frame_probe_ms),
            include_iframes: self.include_iframes,
            nameless: if self.descend_nameless_frames {
                NamelessFrames::Descend
            } else {
                NamelessFrames::Skip
            },
        }
    }
}

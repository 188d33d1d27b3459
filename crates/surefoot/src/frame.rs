//! Recursive frame search.
//!
//! Finds a frame by its `name` attribute anywhere in the frame tree and
//! leaves the session switched into it. The walk is depth-first and
//! pre-order over `<frame>` elements in document order; the first match
//! wins. Each level lowers the implicit wait to [`FrameSearch::probe_wait`]
//! so that a document without frames answers immediately, and puts the
//! previous value back on every exit from that level.
//!
//! Frames are entered by element reference, never by name, so siblings
//! sharing a name are each searched and a match lands in the frame that
//! was actually inspected. A frame without a `name` attribute can never
//! match and, by default, is not descended into either; use
//! [`NamelessFrames::Descend`] to walk into such frames too.

use crate::driver::{Driver, FrameTarget, SearchContext};
use crate::implicit::ImplicitWaitGuard;
use crate::locator::Locator;
use crate::result::SurefootResult;
use std::time::Duration;

/// Implicit wait used while probing each level (10ms)
pub const DEFAULT_PROBE_WAIT_MS: u64 = 10;

/// Handling of frames that carry no `name` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamelessFrames {
    /// Neither matched nor searched
    #[default]
    Skip,
    /// Searched through, entered by element reference
    Descend,
}

/// Frame search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSearch {
    /// Implicit wait while listing frames at each level
    pub probe_wait: Duration,
    /// Also consider `<iframe>` elements
    pub include_iframes: bool,
    /// What to do with frames lacking a name
    pub nameless: NamelessFrames,
}

impl Default for FrameSearch {
    fn default() -> Self {
        Self {
            probe_wait: Duration::from_millis(DEFAULT_PROBE_WAIT_MS),
            include_iframes: false,
            nameless: NamelessFrames::Skip,
        }
    }
}

impl FrameSearch {
    /// Default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-level probe wait
    #[must_use]
    pub const fn with_probe_wait(mut self, probe_wait: Duration) -> Self {
        self.probe_wait = probe_wait;
        self
    }

    /// Include `<iframe>` elements
    #[must_use]
    pub const fn with_iframes(mut self, include: bool) -> Self {
        self.include_iframes = include;
        self
    }

    /// Set nameless frame handling
    #[must_use]
    pub const fn with_nameless(mut self, nameless: NamelessFrames) -> Self {
        self.nameless = nameless;
        self
    }

    fn frame_locator(&self) -> Locator {
        if self.include_iframes {
            Locator::css("frame, iframe")
        } else {
            Locator::tag_name("frame")
        }
    }

    /// Switch into the first frame named `frame_name`.
    ///
    /// Starts from the top-level document. Returns `false`, with the
    /// session back at the top-level document, when no frame matches.
    pub fn search<D: Driver + ?Sized>(&self, driver: &D, frame_name: &str) -> SurefootResult<bool> {
        driver.switch_to_default_content()?;
        let found = self.search_level(driver, frame_name, 0)?;
        if found {
            tracing::debug!(frame = frame_name, "switched to frame");
        } else {
            tracing::debug!(frame = frame_name, "frame not found");
        }
        Ok(found)
    }

    fn search_level<D: Driver + ?Sized>(
        &self,
        driver: &D,
        frame_name: &str,
        depth: usize,
    ) -> SurefootResult<bool> {
        let _probe = ImplicitWaitGuard::new(driver, self.probe_wait)?;
        let frames = driver.find_elements(&SearchContext::Session, &self.frame_locator())?;

        for frame in frames {
            let name = driver.attribute(&frame, "name")?;
            match name.as_deref() {
                Some(name) if name == frame_name => {
                    driver.switch_to_frame(&FrameTarget::Element(frame))?;
                    return Ok(true);
                }
                None if self.nameless == NamelessFrames::Skip => {
                    tracing::debug!(depth, element = %frame, "skipping frame without a name");
                    continue;
                }
                _ => {}
            }

            tracing::trace!(depth, element = %frame, name = ?name, "descending");
            driver.switch_to_frame(&FrameTarget::Element(frame))?;
            if self.search_level(driver, frame_name, depth + 1)? {
                return Ok(true);
            }
            driver.switch_to_parent_frame()?;
        }

        Ok(false)
    }
}

/// Search with default settings
pub fn switch_to_frame<D: Driver + ?Sized>(driver: &D, frame_name: &str) -> SurefootResult<bool> {
    FrameSearch::default().search(driver, frame_name)
}

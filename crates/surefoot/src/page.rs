//! Pages: components with a navigation target.

use crate::component::PageComponent;
use crate::driver::Driver;
use crate::result::SurefootResult;
use std::sync::Arc;

/// A page that can be navigated to.
///
/// Override [`Page::go_to_page`] when the page needs more than a plain
/// navigation, for example waiting on `document.readyState`:
///
/// ```
/// use std::sync::Arc;
/// use surefoot::mock::MockDriver;
/// use surefoot::{Page, PageComponent, SessionExt, SurefootResult, WebPage};
///
/// struct Dashboard(WebPage<MockDriver>);
///
/// impl Page<MockDriver> for Dashboard {
///     fn component(&self) -> &PageComponent<MockDriver> {
///         self.0.component()
///     }
///
///     fn url(&self) -> &str {
///         self.0.url()
///     }
///
///     fn go_to_page(&self) -> SurefootResult<()> {
///         self.0.go_to_page()?;
///         self.component().driver().wait_for_page_loaded()
///     }
/// }
///
/// let driver = Arc::new(MockDriver::new());
/// driver.push_script_results([serde_json::json!("complete")]);
/// let page = Dashboard(WebPage::new(Arc::clone(&driver), "https://example.test/dash"));
/// page.go_to_page().unwrap();
/// assert_eq!(driver.current_url(), "https://example.test/dash");
/// ```
pub trait Page<D: Driver + ?Sized> {
    /// Component spanning the page
    fn component(&self) -> &PageComponent<D>;

    /// Navigation target
    fn url(&self) -> &str;

    /// Navigate the driver to [`Page::url`]
    fn go_to_page(&self) -> SurefootResult<()> {
        let url = self.url();
        tracing::debug!(url, "navigating");
        self.component().driver().navigate(url)
    }
}

/// Page bound to the whole document of a driver
#[derive(Debug)]
pub struct WebPage<D: Driver + ?Sized> {
    component: PageComponent<D>,
    url: String,
}

impl<D: Driver + ?Sized> WebPage<D> {
    /// Page at `url`
    pub fn new(driver: Arc<D>, url: impl Into<String>) -> Self {
        Self {
            component: PageComponent::new(driver),
            url: url.into(),
        }
    }

    /// Page at `url` built on an existing component
    pub fn from_component(component: PageComponent<D>, url: impl Into<String>) -> Self {
        Self {
            component,
            url: url.into(),
        }
    }
}

impl<D: Driver + ?Sized> Page<D> for WebPage<D> {
    fn component(&self) -> &PageComponent<D> {
        &self.component
    }

    fn url(&self) -> &str {
        &self.url
    }
}

//! Lazily-resolving page components.
//!
//! A [`PageComponent`] is a handle on part of a page. When it is bound to a
//! locator, the element is looked up again on every access, so a component
//! outlives re-renders that would leave a stored element reference stale.
//! Two accesses may therefore yield different elements; compare what they
//! contain, not their handles.
//!
//! ```
//! use std::sync::Arc;
//! use surefoot::mock::{MockDriver, MockElement};
//! use surefoot::{Locator, PageComponent};
//!
//! let driver = Arc::new(MockDriver::new());
//! let _ = driver.add_element(driver.root(), MockElement::new("nav").with_attribute("id", "menu"));
//! let menu = PageComponent::located(Arc::clone(&driver), Locator::id("menu"));
//! assert!(menu.as_element().is_ok());
//! ```

use crate::driver::{Driver, ElementHandle, SearchContext};
use crate::locator::Locator;
use crate::result::{SurefootError, SurefootResult};
use crate::wait::{Wait, WaitOptions};
use std::fmt;
use std::sync::Arc;

/// What a component is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A fixed context, never re-resolved
    Context(SearchContext),
    /// An element found from the whole document on each access
    Locator(Locator),
    /// An element found within another binding on each access
    Nested {
        /// Scope the locator is resolved in
        parent: Box<Binding>,
        /// Locator resolved within the parent
        locator: Locator,
    },
}

impl Binding {
    fn resolve<D: Driver + ?Sized>(&self, driver: &D) -> SurefootResult<SearchContext> {
        match self {
            Self::Context(context) => Ok(context.clone()),
            Self::Locator(locator) => driver
                .find_element(&SearchContext::Session, locator)
                .map(SearchContext::Element),
            Self::Nested { parent, locator } => {
                let scope = parent.resolve(driver)?;
                driver.find_element(&scope, locator).map(SearchContext::Element)
            }
        }
    }

    fn locator(&self) -> Option<&Locator> {
        match self {
            Self::Context(_) => None,
            Self::Locator(locator) | Self::Nested { locator, .. } => Some(locator),
        }
    }
}

/// Part of a page, found through a shared driver
pub struct PageComponent<D: Driver + ?Sized> {
    driver: Arc<D>,
    binding: Binding,
}

impl<D: Driver + ?Sized> PageComponent<D> {
    /// Component spanning the whole document
    pub fn new(driver: Arc<D>) -> Self {
        Self::with_context(driver, SearchContext::Session)
    }

    /// Component bound to a fixed context
    pub fn with_context(driver: Arc<D>, context: SearchContext) -> Self {
        Self {
            driver,
            binding: Binding::Context(context),
        }
    }

    /// Component bound to a fixed element
    pub fn with_element(driver: Arc<D>, element: ElementHandle) -> Self {
        Self::with_context(driver, SearchContext::Element(element))
    }

    /// Component whose element is looked up by `locator` on each access
    pub fn located(driver: Arc<D>, locator: Locator) -> Self {
        Self {
            driver,
            binding: Binding::Locator(locator),
        }
    }

    /// Component located within this one
    #[must_use]
    pub fn child(&self, locator: Locator) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            binding: Binding::Nested {
                parent: Box::new(self.binding.clone()),
                locator,
            },
        }
    }

    /// Current search context, resolving the locator if there is one
    pub fn context(&self) -> SurefootResult<SearchContext> {
        self.binding.resolve(self.driver.as_ref())
    }

    /// Locator given at construction
    pub fn locator(&self) -> Option<&Locator> {
        self.binding.locator()
    }

    /// How the component is attached
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The context as a single element
    pub fn as_element(&self) -> SurefootResult<ElementHandle> {
        match self.context()? {
            SearchContext::Element(element) => Ok(element),
            SearchContext::Session => Err(SurefootError::NotAnElement),
        }
    }

    /// Shared driver
    pub const fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    /// Wait with default options
    pub fn wait(&self) -> Wait<'_, D> {
        self.wait_with(WaitOptions::default())
    }

    /// Wait with explicit options
    pub fn wait_with(&self, options: WaitOptions) -> Wait<'_, D> {
        Wait::new(self.driver.as_ref(), options)
    }

    /// First match for `locator` inside the component
    pub fn find_element(&self, locator: &Locator) -> SurefootResult<ElementHandle> {
        let context = self.context()?;
        self.driver.find_element(&context, locator)
    }

    /// Every match for `locator` inside the component
    pub fn find_elements(&self, locator: &Locator) -> SurefootResult<Vec<ElementHandle>> {
        let context = self.context()?;
        self.driver.find_elements(&context, locator)
    }
}

impl<D: Driver + ?Sized> Clone for PageComponent<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            binding: self.binding.clone(),
        }
    }
}

impl<D: Driver + ?Sized> fmt::Debug for PageComponent<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageComponent")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

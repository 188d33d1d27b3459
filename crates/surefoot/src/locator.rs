//! Locators: immutable selection strategy + selector string.
//!
//! Two locators are equal iff both strategy and selector match. Strategies
//! that the W3C protocol does not know natively (`name`, `id`, `class name`)
//! are lowered to CSS in [`Locator::to_w3c`], the same way Selenium clients do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// CSS selector (e.g., "button.primary")
    Css,
    /// Element tag name (e.g., "frame")
    TagName,
    /// `name` attribute equals
    Name,
    /// `id` attribute equals
    Id,
    /// XPath expression
    XPath,
    /// Exact anchor text
    LinkText,
    /// Anchor text contains
    PartialLinkText,
    /// Single class name
    ClassName,
}

impl Strategy {
    /// Human-readable name, as Selenium prints it
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css selector",
            Self::TagName => "tag name",
            Self::Name => "name",
            Self::Id => "id",
            Self::XPath => "xpath",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
            Self::ClassName => "class name",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable element locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    selector: String,
}

impl Locator {
    /// Create a locator from parts
    #[must_use]
    pub fn new(strategy: Strategy, selector: impl Into<String>) -> Self {
        Self {
            strategy,
            selector: selector.into(),
        }
    }

    /// CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Strategy::Css, selector)
    }

    /// Tag name
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::new(Strategy::TagName, tag)
    }

    /// `name` attribute
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::new(Strategy::Name, name)
    }

    /// `id` attribute
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::new(Strategy::Id, id)
    }

    /// XPath expression
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, expr)
    }

    /// Exact link text
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, text)
    }

    /// Partial link text
    #[must_use]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::new(Strategy::PartialLinkText, text)
    }

    /// Class name
    #[must_use]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, class)
    }

    /// Selection strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Raw selector string
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// W3C `(using, value)` pair for the find-element commands
    #[must_use]
    pub fn to_w3c(&self) -> (&'static str, String) {
        match self.strategy {
            Strategy::Css => ("css selector", self.selector.clone()),
            Strategy::TagName => ("tag name", self.selector.clone()),
            Strategy::XPath => ("xpath", self.selector.clone()),
            Strategy::LinkText => ("link text", self.selector.clone()),
            Strategy::PartialLinkText => ("partial link text", self.selector.clone()),
            Strategy::Name => (
                "css selector",
                format!("*[name=\"{}\"]", escape_css_string(&self.selector)),
            ),
            Strategy::Id => ("css selector", format!("#{}", escape_css_ident(&self.selector))),
            Strategy::ClassName => (
                "css selector",
                format!(".{}", escape_css_ident(&self.selector)),
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "By.{}: {}", self.strategy, self.selector)
    }
}

/// Escape a value placed inside a double-quoted CSS string
pub(crate) fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a CSS identifier (id or class)
fn escape_css_ident(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        let leading_digit = i == 0 && c.is_ascii_digit();
        if leading_digit {
            out.push_str(&format!("\\{:x} ", u32::from(c)));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

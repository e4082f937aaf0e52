//! Locator abstraction for element selection.
//!
//! A locator is a selector strategy plus wait options. Locators are immutable
//! and defined at page-object construction time; all waiting happens in the
//! session when a locator is resolved.

use std::time::Duration;

/// Default timeout for element lookups (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval for element lookups (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button.add-to-cart")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id
    Id(String),
    /// Anchor matched by its exact trimmed text
    LinkText(String),
}

impl Selector {
    /// Create a CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create an id selector
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a link-text selector
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// The raw selector string, without the strategy
    pub fn raw(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::Id(s) | Self::LinkText(s) => s,
        }
    }

    /// Convert to a JavaScript expression resolving the first match (or null)
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::LinkText(t) => {
                format!("Array.from(document.querySelectorAll('a')).find(el => el.textContent.trim() === {t:?})")
            }
        }
    }

    /// Convert to a JavaScript expression counting all matches
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength")
            }
            Self::Id(id) => format!("document.getElementById({id:?}) === null ? 0 : 1"),
            Self::LinkText(t) => {
                format!("Array.from(document.querySelectorAll('a')).filter(el => el.textContent.trim() === {t:?}).length")
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::LinkText(s) => write!(f, "link={s}"),
        }
    }
}

/// Options controlling how a locator is resolved
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for presence polling
    pub timeout: Duration,
    /// Polling interval
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A locator for finding elements: selector strategy plus wait options.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator with a CSS selector and default options
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator with an XPath selector and default options
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::xpath(selector))
    }

    /// Create a locator with an id selector and default options
    pub fn id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::id(id))
    }

    /// Create a locator with a link-text selector and default options
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::link_text(text))
    }

    /// Create a locator from a selector
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Get the selector
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.selector.fmt(f)
    }
}

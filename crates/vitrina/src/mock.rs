//! In-memory driver for browserless testing.
//!
//! [`MockDriver`] implements [`Driver`] against a set of scripted page states
//! so page objects, the step catalogue, and the runner can be exercised in
//! unit and integration tests without a browser. Selector matching is
//! exact-string on the selector (no CSS engine); click effects let a test
//! script what the page does in response to an action.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::driver::Driver;
use crate::locator::Selector;
use crate::result::VitrinaResult;

/// One element in a mock page
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Text content
    pub text: String,
    /// Attribute map (`value` included)
    pub attrs: HashMap<String, String>,
    /// Whether the element is visible
    pub visible: bool,
    /// How many elements this entry stands for (for count queries)
    pub matches: usize,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            attrs: HashMap::new(),
            visible: true,
            matches: 1,
        }
    }
}

impl MockElement {
    /// Create a visible element with no text
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Mark the element hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set the match count this entry stands for
    #[must_use]
    pub fn with_matches(mut self, matches: usize) -> Self {
        self.matches = matches;
        self
    }
}

/// A scripted page: elements keyed by selector, plus title and source
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    /// Document title
    pub title: String,
    /// Raw page source
    pub source: String,
    /// Elements keyed by the exact selector used to look them up
    pub elements: HashMap<Selector, MockElement>,
}

impl MockPage {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the page source
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Add an element
    #[must_use]
    pub fn with_element(mut self, selector: Selector, element: MockElement) -> Self {
        self.elements.insert(selector, element);
        self
    }
}

/// A scripted response to clicking an element
#[derive(Debug, Clone)]
pub enum ClickEffect {
    /// Add (or replace) an element on the current page
    Insert(Selector, MockElement),
    /// Remove an element from the current page
    Remove(Selector),
    /// Replace an element's text
    SetText(Selector, String),
    /// Navigate to another registered page
    Navigate(String),
}

/// A recorded driver interaction, for zero-side-effect assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A navigation
    Navigate(String),
    /// A click
    Click(Selector),
    /// A clear-and-type
    Type(Selector, String),
    /// A dropdown selection
    Select(Selector, String),
}

#[derive(Debug, Default)]
struct MockState {
    pages: HashMap<String, MockPage>,
    current_url: String,
    effects: Vec<(Selector, ClickEffect)>,
    interactions: Vec<Interaction>,
    quit: bool,
}

/// Driver implementation over scripted in-memory pages.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty mock driver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page under a URL
    pub fn add_page(&self, url: impl Into<String>, page: MockPage) {
        let mut state = self.state.lock().unwrap();
        state.pages.insert(url.into(), page);
    }

    /// Script an effect to apply when `selector` is clicked
    pub fn on_click(&self, selector: Selector, effect: ClickEffect) {
        let mut state = self.state.lock().unwrap();
        state.effects.push((selector, effect));
    }

    /// Mutate an element on an already-registered page
    pub fn set_element(&self, url: &str, selector: Selector, element: MockElement) {
        let mut state = self.state.lock().unwrap();
        if let Some(page) = state.pages.get_mut(url) {
            page.elements.insert(selector, element);
        }
    }

    /// All mutating interactions recorded so far
    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.lock().unwrap().interactions.clone()
    }

    /// Whether `quit` was called
    pub fn is_quit(&self) -> bool {
        self.state.lock().unwrap().quit
    }

    fn with_current<T>(&self, f: impl FnOnce(&MockPage) -> T) -> T {
        let state = self.state.lock().unwrap();
        let current = state.current_url.clone();
        match state.pages.get(&current) {
            Some(page) => f(page),
            None => f(&MockPage::default()),
        }
    }

    fn apply_effect(state: &mut MockState, effect: ClickEffect) {
        match effect {
            ClickEffect::Insert(sel, el) => {
                let url = state.current_url.clone();
                if let Some(page) = state.pages.get_mut(&url) {
                    page.elements.insert(sel, el);
                }
            }
            ClickEffect::Remove(sel) => {
                let url = state.current_url.clone();
                if let Some(page) = state.pages.get_mut(&url) {
                    page.elements.remove(&sel);
                }
            }
            ClickEffect::SetText(sel, text) => {
                let url = state.current_url.clone();
                if let Some(page) = state.pages.get_mut(&url) {
                    if let Some(el) = page.elements.get_mut(&sel) {
                        el.text = text;
                    }
                }
            }
            ClickEffect::Navigate(url) => {
                state.current_url = url;
            }
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state.current_url = url.to_string();
        state.pages.entry(url.to_string()).or_default();
        state.interactions.push(Interaction::Navigate(url.to_string()));
        Ok(())
    }

    async fn exists(&self, selector: &Selector) -> VitrinaResult<bool> {
        Ok(self.with_current(|page| page.elements.contains_key(selector)))
    }

    async fn count(&self, selector: &Selector) -> VitrinaResult<usize> {
        Ok(self.with_current(|page| page.elements.get(selector).map_or(0, |el| el.matches)))
    }

    async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool> {
        Ok(self.with_current(|page| page.elements.get(selector).is_some_and(|el| el.visible)))
    }

    async fn text(&self, selector: &Selector) -> VitrinaResult<String> {
        Ok(self.with_current(|page| {
            page.elements
                .get(selector)
                .map(|el| el.text.clone())
                .unwrap_or_default()
        }))
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> VitrinaResult<Option<String>> {
        Ok(self.with_current(|page| {
            page.elements
                .get(selector)
                .and_then(|el| el.attrs.get(name).cloned())
        }))
    }

    async fn scroll_into_view(&self, _selector: &Selector) -> VitrinaResult<()> {
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state.interactions.push(Interaction::Click(selector.clone()));
        let pending: Vec<ClickEffect> = state
            .effects
            .iter()
            .filter(|(sel, _)| sel == selector)
            .map(|(_, effect)| effect.clone())
            .collect();
        for effect in pending {
            Self::apply_effect(&mut state, effect);
        }
        Ok(())
    }

    async fn clear_and_type(&self, selector: &Selector, text: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .interactions
            .push(Interaction::Type(selector.clone(), text.to_string()));
        let url = state.current_url.clone();
        if let Some(page) = state.pages.get_mut(&url) {
            let el = page.elements.entry(selector.clone()).or_default();
            el.attrs.insert("value".to_string(), text.to_string());
        }
        Ok(())
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .interactions
            .push(Interaction::Select(selector.clone(), value.to_string()));
        let url = state.current_url.clone();
        if let Some(page) = state.pages.get_mut(&url) {
            let el = page.elements.entry(selector.clone()).or_default();
            el.attrs.insert("value".to_string(), value.to_string());
        }
        Ok(())
    }

    async fn execute_script(&self, _script: &str) -> VitrinaResult<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }

    async fn title(&self) -> VitrinaResult<String> {
        Ok(self.with_current(|page| page.title.clone()))
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.state.lock().unwrap().current_url.clone())
    }

    async fn page_source(&self) -> VitrinaResult<String> {
        Ok(self.with_current(|page| page.source.clone()))
    }

    async fn quit(&self) -> VitrinaResult<()> {
        self.state.lock().unwrap().quit = true;
        Ok(())
    }
}

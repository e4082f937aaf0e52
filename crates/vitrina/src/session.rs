//! Shared browser session.
//!
//! [`Session`] wraps the run's single [`Driver`] connection and layers the
//! wait contract on top of it: element lookups poll for presence up to the
//! locator timeout and fail with `ElementNotFound`, actions resolve first and
//! perform nothing on a failed resolution. Page objects hold `Session` clones;
//! every clone shares the same underlying connection.

use std::sync::Arc;

use tracing::debug;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::wait::{wait_until, WaitOptions};

/// Handle to the run-wide browser connection.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over a driver connection
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    /// The underlying driver handle
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Navigate to a URL
    pub async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        debug!(url, "navigate");
        self.driver.navigate(url).await
    }

    /// Wait for the first match of `locator` to be present.
    ///
    /// Polls at the locator's interval up to its timeout. Performs no action
    /// on the page.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::ElementNotFound`] if no element appears in time.
    pub async fn find(&self, locator: &Locator) -> VitrinaResult<()> {
        let options = WaitOptions::new()
            .with_timeout(locator.options().timeout.as_millis() as u64)
            .with_poll_interval(locator.options().poll_interval.as_millis() as u64);
        let found = wait_until(&options, || async {
            self.driver.exists(locator.selector()).await
        })
        .await?;
        if found {
            Ok(())
        } else {
            Err(VitrinaError::ElementNotFound {
                selector: locator.to_string(),
                timeout_ms: options.timeout_ms,
            })
        }
    }

    /// Wait for at least one match of `locator`, then return the match count.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::ElementNotFound`] if no element ever appears.
    pub async fn find_all(&self, locator: &Locator) -> VitrinaResult<usize> {
        self.find(locator).await?;
        self.driver.count(locator.selector()).await
    }

    /// Resolve, scroll into view, then click.
    ///
    /// The scroll is fire-and-forget; the click follows immediately.
    pub async fn click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.find(locator).await?;
        debug!(%locator, "click");
        self.driver.scroll_into_view(locator.selector()).await?;
        self.driver.click(locator.selector()).await
    }

    /// Resolve, scroll into view, clear existing content, then type `text`.
    pub async fn enter_text(&self, locator: &Locator, text: &str) -> VitrinaResult<()> {
        self.find(locator).await?;
        debug!(%locator, text, "enter_text");
        self.driver.scroll_into_view(locator.selector()).await?;
        self.driver.clear_and_type(locator.selector(), text).await
    }

    /// Resolve, then choose a dropdown option by value.
    pub async fn select_option(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        self.find(locator).await?;
        debug!(%locator, value, "select_option");
        self.driver.scroll_into_view(locator.selector()).await?;
        self.driver.select_option(locator.selector(), value).await
    }

    /// Resolve, then read the element's trimmed text content.
    pub async fn text(&self, locator: &Locator) -> VitrinaResult<String> {
        self.find(locator).await?;
        let raw = self.driver.text(locator.selector()).await?;
        Ok(raw.trim().to_string())
    }

    /// Resolve, then read an attribute (empty string when absent).
    pub async fn attribute(&self, locator: &Locator, name: &str) -> VitrinaResult<String> {
        self.find(locator).await?;
        let value = self.driver.attribute(locator.selector(), name).await?;
        Ok(value.unwrap_or_default())
    }

    /// Presence + visibility predicate. Does not wait; absence is `false`.
    pub async fn is_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        self.driver.is_visible(locator.selector()).await
    }

    /// Number of current matches. Does not wait.
    pub async fn count(&self, locator: &Locator) -> VitrinaResult<usize> {
        self.driver.count(locator.selector()).await
    }

    /// The document title
    pub async fn title(&self) -> VitrinaResult<String> {
        self.driver.title().await
    }

    /// The current URL
    pub async fn current_url(&self) -> VitrinaResult<String> {
        self.driver.current_url().await
    }

    /// The rendered page source
    pub async fn page_source(&self) -> VitrinaResult<String> {
        self.driver.page_source().await
    }

    /// Evaluate an arbitrary script expression
    pub async fn execute_script(&self, script: &str) -> VitrinaResult<serde_json::Value> {
        self.driver.execute_script(script).await
    }

    /// Tear down the underlying connection
    pub async fn quit(&self) -> VitrinaResult<()> {
        debug!("quit");
        self.driver.quit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use crate::mock::{Interaction, MockDriver, MockElement, MockPage};
    use std::time::Duration;

    const URL: &str = "https://shop.test/";

    fn fast(locator: Locator) -> Locator {
        locator
            .with_timeout(Duration::from_millis(30))
            .with_poll_interval(Duration::from_millis(5))
    }

    fn session_with(page: MockPage) -> (Arc<MockDriver>, Session) {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(URL, page);
        let session = Session::new(driver.clone());
        (driver, session)
    }

    #[tokio::test]
    async fn test_find_present_element() {
        let (_, session) = session_with(
            MockPage::new().with_element(Selector::css("h1"), MockElement::new().with_text("Shop")),
        );
        session.navigate(URL).await.unwrap();
        session.find(&Locator::css("h1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_times_out_with_element_not_found() {
        let (_, session) = session_with(MockPage::new());
        session.navigate(URL).await.unwrap();
        let err = session.find(&fast(Locator::css("h1"))).await.unwrap_err();
        assert!(matches!(err, VitrinaError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_failed_resolution_attempts_no_action() {
        let (driver, session) = session_with(MockPage::new());
        session.navigate(URL).await.unwrap();

        let missing = fast(Locator::css("button.add-to-cart"));
        assert!(session.click(&missing).await.is_err());
        assert!(session.enter_text(&missing, "3").await.is_err());

        // only the navigation was recorded; no click or type reached the page
        assert_eq!(
            driver.interactions(),
            vec![Interaction::Navigate(URL.to_string())]
        );
    }

    #[tokio::test]
    async fn test_click_dispatches_after_resolution() {
        let sel = Selector::css("button.add-to-cart");
        let (driver, session) =
            session_with(MockPage::new().with_element(sel.clone(), MockElement::new()));
        session.navigate(URL).await.unwrap();
        session.click(&Locator::css("button.add-to-cart")).await.unwrap();
        assert!(driver.interactions().contains(&Interaction::Click(sel)));
    }

    #[tokio::test]
    async fn test_text_is_trimmed() {
        let (_, session) = session_with(MockPage::new().with_element(
            Selector::css(".cart-title h1"),
            MockElement::new().with_text("  Your cart  \n"),
        ));
        session.navigate(URL).await.unwrap();
        let text = session.text(&Locator::css(".cart-title h1")).await.unwrap();
        assert_eq!(text, "Your cart");
    }

    #[tokio::test]
    async fn test_attribute_defaults_to_empty() {
        let (_, session) = session_with(
            MockPage::new().with_element(Selector::id("qty"), MockElement::new()),
        );
        session.navigate(URL).await.unwrap();
        let value = session.attribute(&Locator::id("qty"), "value").await.unwrap();
        assert_eq!(value, "");
    }

    #[tokio::test]
    async fn test_is_visible_does_not_wait_or_error() {
        let (_, session) = session_with(MockPage::new());
        session.navigate(URL).await.unwrap();
        assert!(!session.is_visible(&Locator::css(".alert-danger")).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_returns_count() {
        let (_, session) = session_with(MockPage::new().with_element(
            Selector::css(".accordion-button"),
            MockElement::new().with_matches(4),
        ));
        session.navigate(URL).await.unwrap();
        let n = session.find_all(&Locator::css(".accordion-button")).await.unwrap();
        assert_eq!(n, 4);
    }
}

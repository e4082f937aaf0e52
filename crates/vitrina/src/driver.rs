//! Browser driver seam.
//!
//! Everything above this module talks to the browser through the [`Driver`]
//! trait: navigate, look elements up, act on them, read rendered state, and
//! quit. The real implementation drives Chrome over CDP (behind the `browser`
//! feature); [`crate::mock::MockDriver`] implements the same trait in memory
//! so the rest of the crate unit-tests without a browser.
//!
//! Element operations take a [`Selector`] and resolve it fresh on every call;
//! there are no element handles to go stale.

use async_trait::async_trait;

use crate::locator::Selector;
use crate::result::VitrinaResult;

/// One live browser automation connection.
///
/// All methods are best-effort single operations with no waiting; the
/// presence-polling contract lives in [`crate::session::Session`].
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> VitrinaResult<()>;

    /// Whether at least one element currently matches
    async fn exists(&self, selector: &Selector) -> VitrinaResult<bool>;

    /// Number of elements currently matching
    async fn count(&self, selector: &Selector) -> VitrinaResult<usize>;

    /// Whether the first match is present and visible (absent counts as `false`)
    async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool>;

    /// Untrimmed text content of the first match
    async fn text(&self, selector: &Selector) -> VitrinaResult<String>;

    /// Attribute value of the first match, `None` if the attribute is absent
    async fn attribute(&self, selector: &Selector, name: &str) -> VitrinaResult<Option<String>>;

    /// Scroll the first match into the viewport center (fire-and-forget)
    async fn scroll_into_view(&self, selector: &Selector) -> VitrinaResult<()>;

    /// Dispatch a click on the first match
    async fn click(&self, selector: &Selector) -> VitrinaResult<()>;

    /// Clear the first match's value, then type `text`
    async fn clear_and_type(&self, selector: &Selector, text: &str) -> VitrinaResult<()>;

    /// Choose a dropdown option by value
    async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()>;

    /// Evaluate an arbitrary script expression
    async fn execute_script(&self, script: &str) -> VitrinaResult<serde_json::Value>;

    /// The document title
    async fn title(&self) -> VitrinaResult<String>;

    /// The current URL
    async fn current_url(&self) -> VitrinaResult<String>;

    /// The rendered page source
    async fn page_source(&self) -> VitrinaResult<String>;

    /// Tear down the connection
    async fn quit(&self) -> VitrinaResult<()>;
}

/// Driver launch configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl DriverConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP implementation (when the `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::{Driver, DriverConfig};
    use crate::locator::Selector;
    use crate::result::{VitrinaError, VitrinaResult};

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Driver backed by a real Chrome `DevTools` Protocol connection.
    #[derive(Debug)]
    pub struct CdpDriver {
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl CdpDriver {
        /// Launch a browser and open one page.
        ///
        /// # Errors
        ///
        /// Returns [`VitrinaError::BrowserLaunch`] if the browser cannot be
        /// launched or the initial page cannot be created.
        pub async fn launch(config: DriverConfig) -> VitrinaResult<Self> {
            let mut builder = CdpConfig::builder();

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| VitrinaError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| VitrinaError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            Ok(Self {
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned + Send>(
            &self,
            expr: String,
        ) -> VitrinaResult<T> {
            let page = self.page.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| VitrinaError::Script {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| VitrinaError::Script {
                message: e.to_string(),
            })
        }
    }

    fn first_match(selector: &Selector) -> String {
        selector.to_query()
    }

    #[async_trait]
    impl Driver for CdpDriver {
        async fn navigate(&self, url: &str) -> VitrinaResult<()> {
            let page = self.page.lock().await;
            page.goto(url).await.map_err(|e| VitrinaError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        async fn exists(&self, selector: &Selector) -> VitrinaResult<bool> {
            let q = first_match(selector);
            self.eval(format!("!!({q})")).await
        }

        async fn count(&self, selector: &Selector) -> VitrinaResult<usize> {
            self.eval(selector.to_count_query()).await
        }

        async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool> {
            let q = first_match(selector);
            self.eval(format!(
                "(() => {{ const el = {q}; if (!el) return false; \
                 const s = window.getComputedStyle(el); \
                 if (s.display === 'none' || s.visibility === 'hidden') return false; \
                 const r = el.getBoundingClientRect(); \
                 return r.width > 0 && r.height > 0; }})()"
            ))
            .await
        }

        async fn text(&self, selector: &Selector) -> VitrinaResult<String> {
            let q = first_match(selector);
            let value: Option<String> = self
                .eval(format!(
                    "(() => {{ const el = {q}; return el ? el.textContent : null; }})()"
                ))
                .await?;
            value.ok_or_else(|| VitrinaError::ElementNotFound {
                selector: selector.to_string(),
                timeout_ms: 0,
            })
        }

        async fn attribute(
            &self,
            selector: &Selector,
            name: &str,
        ) -> VitrinaResult<Option<String>> {
            let q = first_match(selector);
            // `value` is a live property on inputs, not a reflected attribute
            self.eval(format!(
                "(() => {{ const el = {q}; if (!el) return null; \
                 if ({name:?} === 'value' && 'value' in el) return String(el.value); \
                 return el.getAttribute({name:?}); }})()"
            ))
            .await
        }

        async fn scroll_into_view(&self, selector: &Selector) -> VitrinaResult<()> {
            let q = first_match(selector);
            let _: bool = self
                .eval(format!(
                    "(() => {{ const el = {q}; if (!el) return false; \
                     el.scrollIntoView({{behavior: 'smooth', block: 'center'}}); \
                     return true; }})()"
                ))
                .await?;
            Ok(())
        }

        async fn click(&self, selector: &Selector) -> VitrinaResult<()> {
            let q = first_match(selector);
            let clicked: bool = self
                .eval(format!(
                    "(() => {{ const el = {q}; if (!el) return false; el.click(); return true; }})()"
                ))
                .await?;
            if clicked {
                Ok(())
            } else {
                Err(VitrinaError::ElementNotFound {
                    selector: selector.to_string(),
                    timeout_ms: 0,
                })
            }
        }

        async fn clear_and_type(&self, selector: &Selector, text: &str) -> VitrinaResult<()> {
            let q = first_match(selector);
            let typed: bool = self
                .eval(format!(
                    "(() => {{ const el = {q}; if (!el) return false; \
                     if (el.focus) el.focus(); \
                     el.value = ''; el.value = {text:?}; \
                     el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                     el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                     return true; }})()"
                ))
                .await?;
            if typed {
                Ok(())
            } else {
                Err(VitrinaError::ElementNotFound {
                    selector: selector.to_string(),
                    timeout_ms: 0,
                })
            }
        }

        async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()> {
            let q = first_match(selector);
            let selected: bool = self
                .eval(format!(
                    "(() => {{ const el = {q}; if (!el) return false; \
                     el.value = {value:?}; \
                     el.dispatchEvent(new Event('change', {{bubbles: true}})); \
                     return true; }})()"
                ))
                .await?;
            if selected {
                Ok(())
            } else {
                Err(VitrinaError::ElementNotFound {
                    selector: selector.to_string(),
                    timeout_ms: 0,
                })
            }
        }

        async fn execute_script(&self, script: &str) -> VitrinaResult<serde_json::Value> {
            self.eval(script.to_string()).await
        }

        async fn title(&self) -> VitrinaResult<String> {
            self.eval("document.title".to_string()).await
        }

        async fn current_url(&self) -> VitrinaResult<String> {
            self.eval("window.location.href".to_string()).await
        }

        async fn page_source(&self) -> VitrinaResult<String> {
            self.eval("document.documentElement.outerHTML".to_string())
                .await
        }

        async fn quit(&self) -> VitrinaResult<()> {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = DriverConfig::default()
            .with_headless(false)
            .with_chromium_path("/usr/bin/chromium")
            .with_no_sandbox();
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}

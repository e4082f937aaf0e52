//! Page objects for the storefront under test.
//!
//! One page object per distinct application view, each holding a [`Session`]
//! clone and a fixed set of locators defined at construction time. Page
//! objects are stateless beyond the live remote page; all reads go back to
//! the session.

mod cart;
mod checkout;
mod main;
mod product;

pub use cart::CartPage;
pub use checkout::{CheckoutForm, CheckoutPage};
pub use main::MainPage;
pub use product::{ProductPage, SizeOption};

use async_trait::async_trait;

use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::Session;

/// Common behavior of a directly-navigable page.
#[async_trait]
pub trait Page {
    /// The shared session this page drives
    fn session(&self) -> &Session;

    /// Where the page is directly navigable
    fn url(&self) -> &str;

    /// An element whose presence means the page is ready for interaction
    fn ready_marker(&self) -> Locator;

    /// Navigate to the page and block until it is ready
    async fn load(&self) -> VitrinaResult<()> {
        self.session().navigate(self.url()).await?;
        self.wait_until_ready().await
    }

    /// Poll for the ready marker
    async fn wait_until_ready(&self) -> VitrinaResult<()> {
        self.session().find(&self.ready_marker()).await
    }

    /// Whether the current URL is exactly this page's URL
    async fn is_url_matches(&self) -> VitrinaResult<bool> {
        Ok(self.session().current_url().await? == self.url())
    }
}

/// Parse a displayed price into a float.
///
/// Strips one leading currency symbol and all `,` thousands separators, then
/// parses the remainder. Idempotent on already-clean input.
///
/// # Errors
///
/// Returns [`VitrinaError::Parse`] if the remaining text is not numeric.
pub fn parse_price(text: &str) -> VitrinaResult<f64> {
    let trimmed = text.trim();
    let without_symbol = trimmed
        .strip_prefix(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
        .unwrap_or(trimmed);
    let cleaned: String = without_symbol.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| VitrinaError::Parse {
            text: text.to_string(),
        })
}

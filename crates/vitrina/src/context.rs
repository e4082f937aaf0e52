//! Per-scenario context.
//!
//! One [`ScenarioContext`] is built before each scenario and dropped after
//! it. It bundles fresh page-object wrappers bound to the run's single
//! session; no state leaks between scenarios through the context, only
//! through the live browser itself.

use crate::pages::{CartPage, CheckoutPage, MainPage, ProductPage};
use crate::session::Session;

/// The page objects and session handle one scenario works with.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// The run-wide session
    pub session: Session,
    /// Landing page
    pub main_page: MainPage,
    /// Product detail page
    pub product_page: ProductPage,
    /// Cart page
    pub cart_page: CartPage,
    /// Checkout page
    pub checkout_page: CheckoutPage,
}

impl ScenarioContext {
    /// Build fresh page-object wrappers over the shared session
    pub fn new(session: Session) -> Self {
        Self {
            main_page: MainPage::new(session.clone()),
            product_page: ProductPage::new(session.clone()),
            cart_page: CartPage::new(session.clone()),
            checkout_page: CheckoutPage::new(session.clone()),
            session,
        }
    }
}

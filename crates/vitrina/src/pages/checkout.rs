//! Checkout page.

use async_trait::async_trait;

use super::Page;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use crate::session::Session;

/// Billing details for the one-page checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    /// Customer email
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub phone: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Postal code
    pub postcode: String,
    /// Country code, matched against the dropdown's option values
    pub country: String,
}

impl CheckoutForm {
    /// Fixed test data used by the fill-checkout-form step
    pub fn sample() -> Self {
        Self {
            email: "test@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: "123456789".to_string(),
            address: "123 Main St".to_string(),
            city: "Testville".to_string(),
            postcode: "12345".to_string(),
            country: "US".to_string(),
        }
    }
}

/// Page object for the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutPage {
    session: Session,
    checkout_header: Locator,
    email_input: Locator,
    first_name_input: Locator,
    last_name_input: Locator,
    phone_input: Locator,
    address_input: Locator,
    city_input: Locator,
    postcode_input: Locator,
    country_selector: Locator,
}

impl CheckoutPage {
    /// Where the checkout page lives
    pub const URL: &'static str = "https://aeonstest.info/checkout/";

    /// Bind a checkout page to the shared session
    pub fn new(session: Session) -> Self {
        Self {
            session,
            checkout_header: Locator::css("h1.checkout-title"),
            email_input: Locator::id("app_one_page_checkout_customer_email"),
            first_name_input: Locator::id("app_one_page_checkout_billingAddress_firstName"),
            last_name_input: Locator::id("app_one_page_checkout_billingAddress_lastName"),
            phone_input: Locator::id("app_one_page_checkout_billingAddress_phoneNumber"),
            address_input: Locator::id("app_one_page_checkout_billingAddress_street"),
            city_input: Locator::id("app_one_page_checkout_billingAddress_city"),
            postcode_input: Locator::id("app_one_page_checkout_billingAddress_postcode"),
            country_selector: Locator::id("app_one_page_checkout_billingAddress_countryCode"),
        }
    }

    /// Whether the checkout header is visible
    pub async fn is_checkout_page(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.checkout_header).await
    }

    /// Fill every billing field, then choose the country from the dropdown
    pub async fn fill_in_checkout_form(&self, form: &CheckoutForm) -> VitrinaResult<()> {
        self.session.enter_text(&self.email_input, &form.email).await?;
        self.session
            .enter_text(&self.first_name_input, &form.first_name)
            .await?;
        self.session
            .enter_text(&self.last_name_input, &form.last_name)
            .await?;
        self.session.enter_text(&self.phone_input, &form.phone).await?;
        self.session
            .enter_text(&self.address_input, &form.address)
            .await?;
        self.session.enter_text(&self.city_input, &form.city).await?;
        self.session
            .enter_text(&self.postcode_input, &form.postcode)
            .await?;
        self.session
            .select_option(&self.country_selector, &form.country)
            .await
    }
}

#[async_trait]
impl Page for CheckoutPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self) -> &str {
        Self::URL
    }

    fn ready_marker(&self) -> Locator {
        self.checkout_header.clone()
    }
}

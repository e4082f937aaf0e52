//! Cart page.

use async_trait::async_trait;

use super::{parse_price, Page};
use crate::locator::Locator;
use crate::result::VitrinaResult;
use crate::session::Session;

/// Page object for the cart page.
#[derive(Debug, Clone)]
pub struct CartPage {
    session: Session,
    cart_title: Locator,
    product_image: Locator,
    product_description: Locator,
    quantity_input: Locator,
    unit_price: Locator,
    total_price: Locator,
    remove_item_button: Locator,
    coupon_input: Locator,
    apply_coupon_button: Locator,
    update_cart_button: Locator,
    checkout_button: Locator,
    discount_amount: Locator,
    error_message: Locator,
    empty_cart_message: Locator,
    success_message: Locator,
    purchase_type: Locator,
    checkout_error_message: Locator,
}

impl CartPage {
    /// Where the cart page lives
    pub const URL: &'static str = "https://aeonstest.info/cart/";

    /// Text the add-to-cart success banner must contain
    pub const ADDED_TO_CART_MESSAGE: &'static str = "Item has been added to cart";

    /// Bind a cart page to the shared session
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cart_title: Locator::css(".cart-title h1"),
            product_image: Locator::css(".product-image-and-description img"),
            product_description: Locator::css(".product-description h3"),
            quantity_input: Locator::id("sylius_cart_items_0_quantity"),
            unit_price: Locator::css("td.numbers span"),
            total_price: Locator::css("td.numbers:nth-child(4)"),
            remove_item_button: Locator::css(".remove-item-button"),
            coupon_input: Locator::id("sylius_cart_promotionCoupon"),
            apply_coupon_button: Locator::css(".coupon-section button[type=submit]"),
            update_cart_button: Locator::css(".update-cart-button"),
            checkout_button: Locator::css(".checkout-btn"),
            discount_amount: Locator::css(".discount-amount"),
            error_message: Locator::css(".alert-danger"),
            empty_cart_message: Locator::css(".empty-cart-message"),
            success_message: Locator::css(".alert-success"),
            purchase_type: Locator::xpath(
                "//td[contains(text(), 'Purchase type:')]//following-sibling::td",
            ),
            checkout_error_message: Locator::css(".checkout-error-message"),
        }
    }

    /// Trimmed cart title text
    pub async fn cart_title(&self) -> VitrinaResult<String> {
        self.session.text(&self.cart_title).await
    }

    /// Whether the named product is displayed in the cart
    pub async fn is_product_displayed(&self, product_name: &str) -> VitrinaResult<bool> {
        if !self.session.is_visible(&self.product_description).await? {
            return Ok(false);
        }
        let displayed = self.session.text(&self.product_description).await?;
        Ok(displayed == product_name)
    }

    /// Whether the product image is displayed
    pub async fn is_product_image_displayed(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.product_image).await
    }

    /// Type a new quantity into the quantity input
    pub async fn update_quantity(&self, quantity: u32) -> VitrinaResult<()> {
        self.session
            .enter_text(&self.quantity_input, &quantity.to_string())
            .await
    }

    /// Current quantity, read from the input's value
    pub async fn quantity(&self) -> VitrinaResult<u32> {
        let value = self.session.attribute(&self.quantity_input, "value").await?;
        value
            .trim()
            .parse()
            .map_err(|_| crate::result::VitrinaError::Parse { text: value })
    }

    /// Unit price of the item
    pub async fn unit_price(&self) -> VitrinaResult<f64> {
        let text = self.session.text(&self.unit_price).await?;
        parse_price(&text)
    }

    /// Displayed cart total
    pub async fn total_price(&self) -> VitrinaResult<f64> {
        let text = self.session.text(&self.total_price).await?;
        parse_price(&text)
    }

    /// Remove the item from the cart
    pub async fn remove_item(&self) -> VitrinaResult<()> {
        self.session.click(&self.remove_item_button).await
    }

    /// Whether the remove-item button is displayed
    pub async fn is_remove_button_displayed(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.remove_item_button).await
    }

    /// Type a coupon code and submit it
    pub async fn apply_coupon(&self, coupon_code: &str) -> VitrinaResult<()> {
        self.session.enter_text(&self.coupon_input, coupon_code).await?;
        self.session.click(&self.apply_coupon_button).await
    }

    /// Whether a discount amount is displayed
    pub async fn is_discount_applied(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.discount_amount).await
    }

    /// Whether the cart error banner is displayed
    pub async fn is_error_message_displayed(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.error_message).await
    }

    /// Submit the cart update form
    pub async fn update_cart(&self) -> VitrinaResult<()> {
        self.session.click(&self.update_cart_button).await
    }

    /// Block until the cart page has re-rendered after an update
    pub async fn wait_for_cart_to_update(&self) -> VitrinaResult<()> {
        self.wait_until_ready().await
    }

    /// Whether the empty-cart message is displayed
    pub async fn is_cart_empty(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.empty_cart_message).await
    }

    /// Click through to checkout
    pub async fn proceed_to_checkout(&self) -> VitrinaResult<()> {
        self.session.click(&self.checkout_button).await
    }

    /// Whether the add-to-cart success banner is visible with the expected text
    pub async fn is_success_message_displayed(&self) -> VitrinaResult<bool> {
        if !self.session.is_visible(&self.success_message).await? {
            return Ok(false);
        }
        let text = self.session.text(&self.success_message).await?;
        Ok(text.contains(Self::ADDED_TO_CART_MESSAGE))
    }

    /// Trimmed purchase-type cell text
    pub async fn purchase_type(&self) -> VitrinaResult<String> {
        self.session.text(&self.purchase_type).await
    }

    /// Whether checkout was refused with an error
    pub async fn is_prevented_from_checkout(&self) -> VitrinaResult<bool> {
        self.session.is_visible(&self.checkout_error_message).await
    }
}

#[async_trait]
impl Page for CartPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self) -> &str {
        Self::URL
    }

    fn ready_marker(&self) -> Locator {
        self.cart_title.clone()
    }
}

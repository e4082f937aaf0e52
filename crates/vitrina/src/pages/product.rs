//! Product detail page.

use std::str::FromStr;

use async_trait::async_trait;

use super::Page;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::Session;

/// The enumerated size variants the product page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOption {
    /// Single 250ml bottle
    Ml250,
    /// Three-bottle bundle
    ThreeBottles,
}

impl FromStr for SizeOption {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "250ml" => Ok(Self::Ml250),
            "3bottles" => Ok(Self::ThreeBottles),
            other => Err(VitrinaError::InvalidArgument {
                message: format!("invalid size option {other:?}, expected \"250ml\" or \"3bottles\""),
            }),
        }
    }
}

impl std::fmt::Display for SizeOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ml250 => f.write_str("250ml"),
            Self::ThreeBottles => f.write_str("3bottles"),
        }
    }
}

/// Page object for the product detail page.
#[derive(Debug, Clone)]
pub struct ProductPage {
    session: Session,
    add_to_cart_button: Locator,
    size_radio_250ml: Locator,
    size_radio_3bottles: Locator,
    subscribe_button: Locator,
    faq_title: Locator,
    accordion_buttons: Locator,
    expanded_sections: Locator,
}

impl ProductPage {
    /// Where the product page lives
    pub const URL: &'static str = "https://aeonstest.info/products/aeons-total-harmony";

    /// Bind a product page to the shared session
    pub fn new(session: Session) -> Self {
        Self {
            session,
            add_to_cart_button: Locator::css("button.add-to-cart"),
            size_radio_250ml: Locator::id("sylius_add_to_cart_cartItem_variant_0"),
            size_radio_3bottles: Locator::id("sylius_add_to_cart_cartItem_variant_1"),
            subscribe_button: Locator::css(
                ".purchase-option[data-variant-option-subscription='yes']",
            ),
            faq_title: Locator::css("p.h1"),
            accordion_buttons: Locator::css(".accordion-button"),
            expanded_sections: Locator::css(".accordion-collapse.show"),
        }
    }

    /// Pick a size variant. Validation happens before any browser interaction.
    pub async fn select_size(&self, size: SizeOption) -> VitrinaResult<()> {
        let radio = match size {
            SizeOption::Ml250 => &self.size_radio_250ml,
            SizeOption::ThreeBottles => &self.size_radio_3bottles,
        };
        self.session.click(radio).await
    }

    /// Click the add-to-cart button
    pub async fn add_to_cart(&self) -> VitrinaResult<()> {
        self.session.click(&self.add_to_cart_button).await
    }

    /// Click the subscribe purchase option
    pub async fn click_to_subscribe(&self) -> VitrinaResult<()> {
        self.session.click(&self.subscribe_button).await
    }

    /// Trimmed text of the FAQ section title
    pub async fn faq_title(&self) -> VitrinaResult<String> {
        self.session.text(&self.faq_title).await
    }

    /// Click the `index`-th accordion button (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::InvalidArgument`] if `index` is out of range.
    pub async fn click_accordion_button(&self, index: usize) -> VitrinaResult<()> {
        let total = self.session.find_all(&self.accordion_buttons).await?;
        if index >= total {
            return Err(VitrinaError::InvalidArgument {
                message: format!("accordion button index {index} out of range (found {total})"),
            });
        }
        // XPath positions are 1-based
        let nth = Locator::xpath(format!(
            "(//*[contains(@class, 'accordion-button')])[{}]",
            index + 1
        ));
        self.session.click(&nth).await
    }

    /// Whether the `index`-th accordion section is currently expanded
    pub async fn is_section_expanded(&self, index: usize) -> VitrinaResult<bool> {
        let expanded = self.expanded_section_count().await?;
        Ok(expanded > index)
    }

    /// How many accordion sections are currently expanded
    pub async fn expanded_section_count(&self) -> VitrinaResult<usize> {
        self.session.count(&self.expanded_sections).await
    }

    /// Open a product by the exact text of its link
    pub async fn select_product_by_name(&self, product_name: &str) -> VitrinaResult<()> {
        let link = Locator::link_text(product_name);
        self.session.click(&link).await
    }
}

#[async_trait]
impl Page for ProductPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self) -> &str {
        Self::URL
    }

    fn ready_marker(&self) -> Locator {
        self.add_to_cart_button.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use crate::mock::{Interaction, MockDriver, MockElement, MockPage};
    use std::sync::Arc;
    use std::time::Duration;

    fn product_mock() -> MockPage {
        MockPage::new()
            .with_element(Selector::css("button.add-to-cart"), MockElement::new())
            .with_element(
                Selector::id("sylius_add_to_cart_cartItem_variant_0"),
                MockElement::new(),
            )
            .with_element(
                Selector::id("sylius_add_to_cart_cartItem_variant_1"),
                MockElement::new(),
            )
    }

    fn page_with(mock: MockPage) -> (Arc<MockDriver>, ProductPage) {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(ProductPage::URL, mock);
        (driver.clone(), ProductPage::new(Session::new(driver)))
    }

    mod size_option_tests {
        use super::*;

        #[test]
        fn test_accepts_250ml() {
            assert_eq!("250ml".parse::<SizeOption>().unwrap(), SizeOption::Ml250);
        }

        #[test]
        fn test_accepts_3bottles() {
            assert_eq!(
                "3bottles".parse::<SizeOption>().unwrap(),
                SizeOption::ThreeBottles
            );
        }

        #[test]
        fn test_rejects_anything_else() {
            for bad in ["500ml", "", "250ML", "two bottles"] {
                let err = bad.parse::<SizeOption>().unwrap_err();
                assert!(matches!(err, VitrinaError::InvalidArgument { .. }), "{bad}");
            }
        }

        #[test]
        fn test_display_round_trip() {
            assert_eq!(SizeOption::Ml250.to_string(), "250ml");
            assert_eq!(SizeOption::ThreeBottles.to_string(), "3bottles");
        }
    }

    #[tokio::test]
    async fn test_select_size_clicks_matching_radio() {
        let (driver, page) = page_with(product_mock());
        page.load().await.unwrap();
        page.select_size(SizeOption::Ml250).await.unwrap();
        assert!(driver.interactions().contains(&Interaction::Click(
            Selector::id("sylius_add_to_cart_cartItem_variant_0")
        )));
    }

    #[tokio::test]
    async fn test_add_to_cart() {
        let (driver, page) = page_with(product_mock());
        page.load().await.unwrap();
        page.add_to_cart().await.unwrap();
        assert!(driver
            .interactions()
            .contains(&Interaction::Click(Selector::css("button.add-to-cart"))));
    }

    #[tokio::test]
    async fn test_faq_title_trimmed() {
        let (_, page) = page_with(
            product_mock().with_element(
                Selector::css("p.h1"),
                MockElement::new().with_text(" Frequently Asked Questions "),
            ),
        );
        page.load().await.unwrap();
        assert_eq!(page.faq_title().await.unwrap(), "Frequently Asked Questions");
    }

    #[tokio::test]
    async fn test_accordion_index_out_of_range() {
        let (driver, page) = page_with(
            product_mock().with_element(
                Selector::css(".accordion-button"),
                MockElement::new().with_matches(3),
            ),
        );
        page.load().await.unwrap();
        let before = driver.interactions().len();
        let err = page.click_accordion_button(3).await.unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
        // lookup only, no click dispatched
        assert_eq!(driver.interactions().len(), before);
    }

    #[tokio::test]
    async fn test_accordion_click_uses_one_based_xpath() {
        let mock = product_mock()
            .with_element(
                Selector::css(".accordion-button"),
                MockElement::new().with_matches(3),
            )
            .with_element(
                Selector::xpath("(//*[contains(@class, 'accordion-button')])[2]"),
                MockElement::new(),
            );
        let (driver, page) = page_with(mock);
        page.load().await.unwrap();
        page.click_accordion_button(1).await.unwrap();
        assert!(driver.interactions().contains(&Interaction::Click(
            Selector::xpath("(//*[contains(@class, 'accordion-button')])[2]")
        )));
    }

    #[tokio::test]
    async fn test_section_expanded_counts() {
        let (_, page) = page_with(
            product_mock().with_element(
                Selector::css(".accordion-collapse.show"),
                MockElement::new().with_matches(1),
            ),
        );
        page.load().await.unwrap();
        assert_eq!(page.expanded_section_count().await.unwrap(), 1);
        assert!(page.is_section_expanded(0).await.unwrap());
        assert!(!page.is_section_expanded(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_ready_marker_gates_load() {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(ProductPage::URL, MockPage::new());
        let mut page = ProductPage::new(Session::new(driver));
        page.add_to_cart_button = page
            .add_to_cart_button
            .with_timeout(Duration::from_millis(30))
            .with_poll_interval(Duration::from_millis(5));
        let err = page.load().await.unwrap_err();
        assert!(matches!(err, VitrinaError::ElementNotFound { .. }));
    }
}

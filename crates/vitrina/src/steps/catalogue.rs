//! The default sentence catalogue for the storefront suite.
//!
//! Every sentence the scenario scripts use is registered here, bound to the
//! page-object operation or assertion it stands for. Action sentences drive
//! the session; `should` sentences assert and fail with
//! [`VitrinaError::AssertionFailed`].

use crate::pages::{CheckoutForm, Page, SizeOption};
use crate::result::{VitrinaError, VitrinaResult};
use crate::steps::StepRegistry;

/// Marker text on the order confirmation page
pub const PURCHASE_COMPLETED_MARKER: &str = "Thank you for your purchase!";

fn check(passed: bool, expected: &str, actual: &str) -> VitrinaResult<()> {
    if passed {
        Ok(())
    } else {
        Err(VitrinaError::assertion(expected, actual))
    }
}

fn check_visible(visible: bool, what: &str) -> VitrinaResult<()> {
    check(visible, &format!("{what} to be displayed"), "not displayed")
}

fn check_hidden(visible: bool, what: &str) -> VitrinaResult<()> {
    check(!visible, &format!("{what} to be absent"), "displayed")
}

/// Build the registry with every sentence of the storefront suite.
///
/// # Errors
///
/// Returns [`VitrinaError::InvalidArgument`] if a pattern fails to compile,
/// which would be a bug in the catalogue itself.
#[allow(clippy::too_many_lines)]
pub fn catalogue() -> VitrinaResult<StepRegistry> {
    let mut registry = StepRegistry::new();

    // navigation
    registry.register("user is on the main page", |ctx, _args| {
        Box::pin(async move { ctx.main_page.load().await })
    })?;
    registry.register("user is on the product page", |ctx, _args| {
        Box::pin(async move { ctx.product_page.load().await })
    })?;
    registry.register("user is on the cart page", |ctx, _args| {
        Box::pin(async move {
            ctx.cart_page.load().await?;
            let on_cart = ctx.cart_page.is_url_matches().await?;
            check(on_cart, ctx.cart_page.url(), &ctx.session.current_url().await?)
        })
    })?;
    registry.register(r#"title contains "([^"]*)""#, |ctx, args| {
        Box::pin(async move {
            let expected = args.get(0)?.to_string();
            let title = ctx.session.title().await?;
            check(
                title.contains(&expected),
                &format!("title containing {expected:?}"),
                &title,
            )
        })
    })?;
    registry.register("user clicks on the SHOP NOW button", |ctx, _args| {
        Box::pin(async move { ctx.main_page.click_shop_now().await })
    })?;

    // product page
    registry.register(r#"user selects the "([^"]*)" size"#, |ctx, args| {
        Box::pin(async move {
            // validated before any browser interaction
            let size: SizeOption = args.get(0)?.parse()?;
            ctx.product_page.select_size(size).await
        })
    })?;
    registry.register("user adds the product to the cart", |ctx, _args| {
        Box::pin(async move { ctx.product_page.add_to_cart().await })
    })?;
    registry.register(r#"user adds the product "([^"]*)" to the cart"#, |ctx, args| {
        Box::pin(async move {
            let name = args.get(0)?.to_string();
            ctx.product_page.load().await?;
            ctx.product_page.select_product_by_name(&name).await?;
            ctx.product_page.add_to_cart().await
        })
    })?;
    registry.register("user subscribes to product", |ctx, _args| {
        Box::pin(async move { ctx.product_page.click_to_subscribe().await })
    })?;
    registry.register("user is on the FAQ section", |ctx, _args| {
        Box::pin(async move { ctx.product_page.load().await })
    })?;
    registry.register(r#"the FAQ title is "([^"]*)""#, |ctx, args| {
        Box::pin(async move {
            let expected = args.get(0)?.to_string();
            let title = ctx.product_page.faq_title().await?;
            check(title == expected, &expected, &title)
        })
    })?;
    registry.register(r"user clicks on accordion button (\d+)", |ctx, args| {
        Box::pin(async move {
            let position: usize = args.parse(0)?;
            if position == 0 {
                return Err(VitrinaError::InvalidArgument {
                    message: "accordion buttons are numbered from 1".to_string(),
                });
            }
            ctx.product_page.click_accordion_button(position - 1).await
        })
    })?;
    registry.register(r"accordion section (\d+) should be expanded", |ctx, args| {
        Box::pin(async move {
            let position: usize = args.parse(0)?;
            let expanded = ctx.product_page.is_section_expanded(position - 1).await?;
            check(expanded, &format!("section {position} expanded"), "collapsed")
        })
    })?;
    registry.register(r"accordion section (\d+) should be collapsed", |ctx, args| {
        Box::pin(async move {
            let position: usize = args.parse(0)?;
            let expanded = ctx.product_page.is_section_expanded(position - 1).await?;
            check(!expanded, &format!("section {position} collapsed"), "expanded")
        })
    })?;
    registry.register("only one accordion section should be expanded", |ctx, _args| {
        Box::pin(async move {
            let count = ctx.product_page.expanded_section_count().await?;
            check(count == 1, "exactly one expanded section", &count.to_string())
        })
    })?;

    // cart page
    registry.register(
        r#"user sees the message "Item has been added to cart""#,
        |ctx, _args| {
            Box::pin(async move {
                let shown = ctx.cart_page.is_success_message_displayed().await?;
                check_visible(shown, "the add-to-cart confirmation")
            })
        },
    )?;
    registry.register(r#"user should see the cart title "([^"]*)""#, |ctx, args| {
        Box::pin(async move {
            let expected = args.get(0)?.to_string();
            let title = ctx.cart_page.cart_title().await?;
            check(title == expected, &expected, &title)
        })
    })?;
    registry.register(
        r#"user should see the product "([^"]*)" with correct image and description"#,
        |ctx, args| {
            Box::pin(async move {
                let name = args.get(0)?.to_string();
                let product = ctx.cart_page.is_product_displayed(&name).await?;
                check_visible(product, &format!("product {name:?}"))?;
                let image = ctx.cart_page.is_product_image_displayed().await?;
                check_visible(image, "the product image")
            })
        },
    )?;
    registry.register(r#"the purchase type is "([^"]*)""#, |ctx, args| {
        Box::pin(async move {
            let expected = args.get(0)?.to_string();
            let purchase_type = ctx.cart_page.purchase_type().await?;
            check(purchase_type == expected, &expected, &purchase_type)
        })
    })?;
    registry.register(r"user increases the quantity to (\d+)", |ctx, args| {
        Box::pin(async move {
            let quantity: u32 = args.parse(0)?;
            ctx.cart_page.update_quantity(quantity).await?;
            ctx.cart_page.update_cart().await?;
            ctx.cart_page.wait_for_cart_to_update().await
        })
    })?;
    registry.register(r"user decreases the quantity to (\d+)", |ctx, args| {
        Box::pin(async move {
            let quantity: u32 = args.parse(0)?;
            ctx.cart_page.update_quantity(quantity).await?;
            ctx.cart_page.update_cart().await?;
            ctx.cart_page.wait_for_cart_to_update().await
        })
    })?;
    registry.register("the total price should be updated correctly", |ctx, _args| {
        Box::pin(async move {
            let quantity = ctx.cart_page.quantity().await?;
            let unit = ctx.cart_page.unit_price().await?;
            let total = ctx.cart_page.total_price().await?;
            let expected = unit * f64::from(quantity);
            check(
                (expected - total).abs() < 0.005,
                &format!("total {expected:.2}"),
                &format!("{total:.2}"),
            )
        })
    })?;
    registry.register("user removes the item", |ctx, _args| {
        Box::pin(async move {
            ctx.cart_page.remove_item().await?;
            ctx.cart_page.wait_for_cart_to_update().await
        })
    })?;
    registry.register("the remove button should be displayed", |ctx, _args| {
        Box::pin(async move {
            let shown = ctx.cart_page.is_remove_button_displayed().await?;
            check_visible(shown, "the remove button")
        })
    })?;
    registry.register("the cart should be empty", |ctx, _args| {
        Box::pin(async move {
            let empty = ctx.cart_page.is_cart_empty().await?;
            check_visible(empty, "the empty-cart message")
        })
    })?;

    // coupons
    registry.register(r#"user applies (?:a valid|an invalid) coupon code "([^"]*)""#, |ctx, args| {
        Box::pin(async move {
            let code = args.get(0)?.to_string();
            ctx.cart_page.apply_coupon(&code).await?;
            ctx.cart_page.wait_for_cart_to_update().await
        })
    })?;
    registry.register("the discount should be applied", |ctx, _args| {
        Box::pin(async move {
            let applied = ctx.cart_page.is_discount_applied().await?;
            check_visible(applied, "the discount amount")
        })
    })?;
    registry.register("no discount should be applied", |ctx, _args| {
        Box::pin(async move {
            let applied = ctx.cart_page.is_discount_applied().await?;
            check_hidden(applied, "the discount amount")
        })
    })?;
    registry.register("an error message should be displayed", |ctx, _args| {
        Box::pin(async move {
            let shown = ctx.cart_page.is_error_message_displayed().await?;
            check_visible(shown, "the error message")
        })
    })?;

    // checkout
    registry.register("user proceeds to checkout", |ctx, _args| {
        Box::pin(async move { ctx.cart_page.proceed_to_checkout().await })
    })?;
    registry.register(
        "user tries to proceed to checkout with an empty cart",
        |ctx, _args| Box::pin(async move { ctx.cart_page.proceed_to_checkout().await }),
    )?;
    registry.register("user should be on the checkout page", |ctx, _args| {
        Box::pin(async move {
            ctx.checkout_page.wait_until_ready().await?;
            let on_checkout = ctx.checkout_page.is_url_matches().await?;
            check(
                on_checkout,
                ctx.checkout_page.url(),
                &ctx.session.current_url().await?,
            )
        })
    })?;
    registry.register("user should be prevented from proceeding", |ctx, _args| {
        Box::pin(async move {
            let prevented = ctx.cart_page.is_prevented_from_checkout().await?;
            check_visible(prevented, "the checkout error")
        })
    })?;
    registry.register("user should remain on the cart page", |ctx, _args| {
        Box::pin(async move {
            let on_cart = ctx.cart_page.is_url_matches().await?;
            check(on_cart, ctx.cart_page.url(), &ctx.session.current_url().await?)
        })
    })?;
    registry.register("user fills out the checkout form", |ctx, _args| {
        Box::pin(async move {
            ctx.checkout_page
                .fill_in_checkout_form(&CheckoutForm::sample())
                .await
        })
    })?;
    registry.register("the purchase should be successfully completed", |ctx, _args| {
        Box::pin(async move {
            let source = ctx.session.page_source().await?;
            check(
                source.contains(PURCHASE_COMPLETED_MARKER),
                &format!("page containing {PURCHASE_COMPLETED_MARKER:?}"),
                "confirmation text missing",
            )
        })
    })?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ScenarioContext;
    use crate::locator::Selector;
    use crate::mock::{Interaction, MockDriver, MockElement, MockPage};
    use crate::pages::{CartPage, ProductPage};
    use crate::session::Session;
    use std::sync::Arc;

    fn ctx_with(driver: Arc<MockDriver>) -> ScenarioContext {
        ScenarioContext::new(Session::new(driver))
    }

    #[test]
    fn test_catalogue_covers_suite_sentences() {
        let registry = catalogue().unwrap();
        for sentence in [
            "user is on the main page",
            "user is on the product page",
            "user is on the cart page",
            "user clicks on the SHOP NOW button",
            "user selects the \"250ml\" size",
            "user adds the product to the cart",
            "user adds the product \"Aeons Total Harmony\" to the cart",
            "user subscribes to product",
            "user is on the FAQ section",
            "the FAQ title is \"FAQ\"",
            "user clicks on accordion button 2",
            "accordion section 2 should be expanded",
            "accordion section 1 should be collapsed",
            "only one accordion section should be expanded",
            "user sees the message \"Item has been added to cart\"",
            "user should see the cart title \"Your cart\"",
            "user should see the product \"Aeons Total Harmony\" with correct image and description",
            "the purchase type is \"Subscribe & Save\"",
            "user increases the quantity to 3",
            "user decreases the quantity to 1",
            "the total price should be updated correctly",
            "user removes the item",
            "the remove button should be displayed",
            "the cart should be empty",
            "user applies a valid coupon code \"SAVE20\"",
            "user applies an invalid coupon code \"INVALID\"",
            "the discount should be applied",
            "no discount should be applied",
            "an error message should be displayed",
            "user proceeds to checkout",
            "user tries to proceed to checkout with an empty cart",
            "user should be on the checkout page",
            "user should be prevented from proceeding",
            "user should remain on the cart page",
            "user fills out the checkout form",
            "the purchase should be successfully completed",
            "title contains \"Aeons\"",
        ] {
            assert!(registry.matches(sentence), "no pattern for: {sentence}");
        }
    }

    #[tokio::test]
    async fn test_invalid_size_fails_without_touching_browser() {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(
            ProductPage::URL,
            MockPage::new().with_element(Selector::css("button.add-to-cart"), MockElement::new()),
        );
        let ctx = ctx_with(driver.clone());
        let registry = catalogue().unwrap();

        registry.execute(&ctx, "user is on the product page").await.unwrap();
        let before = driver.interactions();

        let err = registry
            .execute(&ctx, "user selects the \"500ml\" size")
            .await
            .unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
        assert_eq!(driver.interactions(), before);
    }

    #[tokio::test]
    async fn test_title_assertion_pass_and_fail() {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(
            "https://aeonstest.info/",
            MockPage::new()
                .with_title("Aeons of wellness")
                .with_element(Selector::css("a.btn[href='/range']"), MockElement::new()),
        );
        let ctx = ctx_with(driver);
        let registry = catalogue().unwrap();

        registry.execute(&ctx, "user is on the main page").await.unwrap();
        registry
            .execute(&ctx, "title contains \"Aeons\"")
            .await
            .unwrap();
        let err = registry
            .execute(&ctx, "title contains \"Bargains\"")
            .await
            .unwrap_err();
        assert!(matches!(err, VitrinaError::AssertionFailed { .. }));
    }

    #[tokio::test]
    async fn test_quantity_step_types_then_submits_update() {
        let driver = Arc::new(MockDriver::new());
        driver.add_page(
            CartPage::URL,
            MockPage::new()
                .with_element(Selector::css(".cart-title h1"), MockElement::new())
                .with_element(Selector::id("sylius_cart_items_0_quantity"), MockElement::new())
                .with_element(Selector::css(".update-cart-button"), MockElement::new()),
        );
        let ctx = ctx_with(driver.clone());
        let registry = catalogue().unwrap();

        registry.execute(&ctx, "user is on the cart page").await.unwrap();
        registry
            .execute(&ctx, "user increases the quantity to 3")
            .await
            .unwrap();

        let log = driver.interactions();
        let type_pos = log.iter().position(|i| {
            *i == Interaction::Type(Selector::id("sylius_cart_items_0_quantity"), "3".to_string())
        });
        let update_pos = log
            .iter()
            .position(|i| *i == Interaction::Click(Selector::css(".update-cart-button")));
        assert!(type_pos.unwrap() < update_pos.unwrap());
    }

    #[tokio::test]
    async fn test_accordion_position_zero_rejected() {
        let driver = Arc::new(MockDriver::new());
        let ctx = ctx_with(driver);
        let registry = catalogue().unwrap();
        let err = registry
            .execute(&ctx, "user clicks on accordion button 0")
            .await
            .unwrap_err();
        assert!(matches!(err, VitrinaError::InvalidArgument { .. }));
    }
}

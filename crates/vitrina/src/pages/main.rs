//! Landing page.

use async_trait::async_trait;

use super::Page;
use crate::locator::Locator;
use crate::result::VitrinaResult;
use crate::session::Session;

/// Page object for the storefront landing page.
#[derive(Debug, Clone)]
pub struct MainPage {
    session: Session,
    shop_now_button: Locator,
}

impl MainPage {
    /// Where the landing page lives
    pub const URL: &'static str = "https://aeonstest.info/";

    /// Bind a main page to the shared session
    pub fn new(session: Session) -> Self {
        Self {
            session,
            shop_now_button: Locator::css("a.btn[href='/range']"),
        }
    }

    /// Click the SHOP NOW call-to-action
    pub async fn click_shop_now(&self) -> VitrinaResult<()> {
        self.session.click(&self.shop_now_button).await
    }
}

#[async_trait]
impl Page for MainPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self) -> &str {
        Self::URL
    }

    fn ready_marker(&self) -> Locator {
        self.shop_now_button.clone()
    }
}

//! Vitrina: browser acceptance testing for the Aeons storefront
//!
//! Vitrina (Spanish: "shop window") drives the storefront through page
//! objects and a sentence-based step catalogue, so acceptance scenarios
//! read as plain scripts and run against either a real Chromium session
//! or an in-memory mock.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    VITRINA Architecture                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//! │  │ Scenario │   │ Step     │   │ Page     │   │ Driver   │  │
//! │  │ Script   │──►│ Catalog  │──►│ Objects  │──►│ (CDP or  │  │
//! │  │ (text)   │   │ (regex)  │   │ (Session)│   │  mock)   │  │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `browser` feature gates the Chromium driver; everything else,
//! including [`mock::MockDriver`], compiles without it.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod context;
pub mod driver;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod result;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod steps;
pub mod wait;

pub use context::ScenarioContext;
pub use driver::{Driver, DriverConfig};
pub use locator::{Locator, LocatorOptions, Selector};
pub use pages::{
    parse_price, CartPage, CheckoutForm, CheckoutPage, MainPage, Page, ProductPage, SizeOption,
};
pub use result::{VitrinaError, VitrinaResult};
pub use runner::{RunReport, ScenarioReport, ScenarioRunner, StepOutcome, StepReport};
pub use scenario::{Feature, Scenario, StepKeyword, StepLine};
pub use session::Session;
pub use steps::{catalogue, StepArgs, StepRegistry};
pub use wait::{wait_until, WaitOptions};

#[cfg(feature = "browser")]
pub use driver::CdpDriver;

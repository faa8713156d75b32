//! Storefront configuration

use rusty_money::iso::{Currency, USD};

use crate::store::CART_STORAGE_KEY;

/// Path of the order endpoint on the backend.
pub const ORDER_ENDPOINT_PATH: &str = "/send-order";

/// Backend base URL used while developing against `localhost`.
pub const DEV_BACKEND_URL: &str = "http://localhost:5000";

/// Page shown after a successful checkout.
pub const LANDING_PAGE: &str = "index.html";

/// Runtime settings shared by the storefront front ends.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Storage key holding the cart
    pub storage_key: String,

    /// Absolute URL orders are posted to
    pub checkout_endpoint: String,

    /// Page to navigate to after a successful checkout
    pub landing_page: String,

    /// Currency prices are displayed in
    pub currency: &'static Currency,
}

impl StorefrontConfig {
    /// Settings for a page served from `origin` (e.g. `https://shop.example`) on `hostname`.
    #[must_use]
    pub fn for_location(origin: &str, hostname: &str) -> Self {
        Self {
            checkout_endpoint: checkout_endpoint(origin, hostname),
            ..Self::default()
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: CART_STORAGE_KEY.to_string(),
            checkout_endpoint: format!("{DEV_BACKEND_URL}{ORDER_ENDPOINT_PATH}"),
            landing_page: LANDING_PAGE.to_string(),
            currency: USD,
        }
    }
}

/// Resolve the order endpoint for a page served from `origin` on `hostname`.
///
/// Pages on `localhost` talk to the development backend; everything else posts to the page's own
/// origin.
#[must_use]
pub fn checkout_endpoint(origin: &str, hostname: &str) -> String {
    let base = if hostname == "localhost" {
        DEV_BACKEND_URL
    } else {
        origin.trim_end_matches('/')
    };

    format!("{base}{ORDER_ENDPOINT_PATH}")
}

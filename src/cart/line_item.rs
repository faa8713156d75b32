//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::line_subtotal;

/// One product in the cart, with the title and price captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product id this line refers to
    pub id: String,

    /// Product title at the time it was added
    pub title: String,

    /// Unit price at the time it was added
    ///
    /// Written as a float, so a slot holding `"price":100` is rewritten as `"price":100.0` on its
    /// first save; the value is unchanged and later saves are byte-stable.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of units, always at least 1 once stored in a cart
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item holding a single unit.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            quantity: 1,
        }
    }

    /// Price of this line (`price * quantity`).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.price, self.quantity)
    }
}

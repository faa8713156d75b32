//! Orders

use jiff::Timestamp;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, LineItem},
    checkout::form::CustomerDetails,
};

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "MO-";

/// Number of random characters following the prefix.
pub const ORDER_ID_TOKEN_LEN: usize = 7;

const ORDER_ID_RADIX: u32 = 36;

/// Generate a short human-readable order id such as `MO-4K7Q2ZD`.
pub fn generate_order_id<R: Rng>(rng: &mut R) -> String {
    let token: String = std::iter::repeat_with(|| {
        char::from_digit(rng.gen_range(0..ORDER_ID_RADIX), ORDER_ID_RADIX)
    })
    .flatten()
    .map(|c| c.to_ascii_uppercase())
    .take(ORDER_ID_TOKEN_LEN)
    .collect();

    format!("{ORDER_ID_PREFIX}{token}")
}

/// A submitted checkout, in the shape the order endpoint accepts.
///
/// Orders are built once from a validated form and a cart snapshot and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: String,
    created_at: Timestamp,
    name: String,
    email: String,
    phone: String,
    address: String,
    notes: String,
    items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
}

impl Order {
    /// Build an order from validated customer details and the current cart.
    pub fn new<R: Rng>(
        customer: CustomerDetails,
        cart: &Cart,
        created_at: Timestamp,
        rng: &mut R,
    ) -> Self {
        Self {
            id: generate_order_id(rng),
            created_at,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            notes: customer.notes,
            items: cart.items().to_vec(),
            subtotal: cart.subtotal(),
        }
    }

    /// Order id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation time
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Customer name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Customer email
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Customer phone
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Delivery address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Customer notes
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Line item snapshot
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of line subtotals, rounded to two decimal places
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use testresult::TestResult;

    use super::*;

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "0917".to_string(),
            address: "123 St".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn order_ids_are_prefixed_uppercase_tokens() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let id = generate_order_id(&mut rng);
            let token = id.strip_prefix(ORDER_ID_PREFIX);

            assert!(token.is_some(), "missing prefix in {id}");
            assert_eq!(token.map(str::len), Some(ORDER_ID_TOKEN_LEN));
            assert!(
                token.is_some_and(|t| t
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())),
                "unexpected characters in {id}"
            );
        }
    }

    #[test]
    fn order_snapshots_cart_and_subtotal() -> TestResult {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p2", "Plan B", Decimal::new(1_999, 2));

        let created_at: Timestamp = "2026-10-19T08:30:00Z".parse()?;
        let order = Order::new(customer(), &cart, created_at, &mut StdRng::seed_from_u64(1));

        assert_eq!(order.items(), cart.items());
        assert_eq!(order.subtotal(), Decimal::new(21_999, 2));
        assert_eq!(order.created_at(), created_at);
        assert_eq!(order.name(), "Ana");

        Ok(())
    }

    #[test]
    fn order_serializes_with_endpoint_field_names() -> TestResult {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));

        let created_at: Timestamp = "2026-10-19T08:30:00Z".parse()?;
        let order = Order::new(customer(), &cart, created_at, &mut StdRng::seed_from_u64(1));

        let json: serde_json::Value = serde_json::to_value(&order)?;

        assert_eq!(json["id"], order.id());
        assert_eq!(json["createdAt"], "2026-10-19T08:30:00Z");
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["address"], "123 St");
        assert_eq!(json["notes"], "");
        assert_eq!(json["subtotal"], 100.0);
        assert_eq!(json["items"][0]["qty"], 1);
        assert_eq!(json["items"][0]["price"], 100.0);

        Ok(())
    }
}

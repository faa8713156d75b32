//! Render models
//!
//! Pure projections of the catalog and the cart into display-ready values. Views rebuild these
//! after every cart change instead of patching what they already show.

use rusty_money::iso::Currency;

use crate::{cart::Cart, pricing::format_amount, products::Catalog};

/// Placeholder shown in the order summary when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Initial value of a catalog card's quantity selector.
pub const DEFAULT_SELECTOR_QUANTITY: i64 = 1;

/// Render model for a product card in the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    /// Product id, used by the add action
    pub id: String,

    /// Product title
    pub title: String,

    /// Short description line
    pub description: String,

    /// Display price
    pub price: String,

    /// Image reference
    pub image: String,

    /// Initial quantity selector value
    pub default_quantity: i64,
}

/// Render model for one line of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Line id, used by the remove, step, and quantity controls
    pub id: String,

    /// Title snapshot
    pub title: String,

    /// Display unit price
    pub unit_price: String,

    /// Current quantity
    pub quantity: u32,

    /// Display line subtotal (`price * quantity`)
    pub subtotal: String,
}

/// Render model for the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSummary {
    /// The cart has no lines.
    Empty {
        /// Placeholder message
        message: &'static str,
    },

    /// The cart has at least one line.
    Lines {
        /// Lines in cart order
        lines: Vec<SummaryLine>,

        /// Display grand total
        total: String,
    },
}

impl OrderSummary {
    /// Display grand total, or `None` for an empty cart.
    #[must_use]
    pub fn total(&self) -> Option<&str> {
        match self {
            Self::Empty { .. } => None,
            Self::Lines { total, .. } => Some(total),
        }
    }

    /// Lines of the summary (empty for an empty cart).
    #[must_use]
    pub fn lines(&self) -> &[SummaryLine] {
        match self {
            Self::Empty { .. } => &[],
            Self::Lines { lines, .. } => lines,
        }
    }
}

/// Project the catalog into product cards.
#[must_use]
pub fn catalog_cards(catalog: &Catalog) -> Vec<CatalogCard> {
    catalog
        .iter()
        .map(|product| CatalogCard {
            id: product.id.clone(),
            title: product.title.clone(),
            description: format!("Premium plan: {}", product.title),
            price: format_amount(product.price, catalog.currency()),
            image: product.image.clone(),
            default_quantity: DEFAULT_SELECTOR_QUANTITY,
        })
        .collect()
}

/// Project the cart into the order summary.
#[must_use]
pub fn order_summary(cart: &Cart, currency: &Currency) -> OrderSummary {
    if cart.is_empty() {
        return OrderSummary::Empty {
            message: EMPTY_CART_MESSAGE,
        };
    }

    let lines = cart
        .iter()
        .map(|item| SummaryLine {
            id: item.id.clone(),
            title: item.title.clone(),
            unit_price: format_amount(item.price, currency),
            quantity: item.quantity,
            subtotal: format_amount(item.subtotal(), currency),
        })
        .collect();

    OrderSummary::Lines {
        lines,
        total: format_amount(cart.subtotal(), currency),
    }
}

/// Text shown in a badge for the given cart.
#[must_use]
pub fn badge_text(cart: &Cart) -> String {
    cart.count().to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::fixtures::storefront_catalog;

    use super::*;

    #[test]
    fn empty_cart_renders_placeholder() {
        let summary = order_summary(&Cart::new(), USD);

        assert_eq!(
            summary,
            OrderSummary::Empty {
                message: EMPTY_CART_MESSAGE
            }
        );
        assert_eq!(summary.total(), None);
        assert!(summary.lines().is_empty());
    }

    #[test]
    fn single_item_renders_line_and_total() {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));

        let summary = order_summary(&cart, USD);

        assert_eq!(summary.total(), Some("$100.00"));
        assert_eq!(
            summary.lines(),
            [SummaryLine {
                id: "p1".to_string(),
                title: "Plan A".to_string(),
                unit_price: "$100.00".to_string(),
                quantity: 1,
                subtotal: "$100.00".to_string(),
            }]
        );
    }

    #[test]
    fn repeated_item_renders_line_subtotal() {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p1", "Plan A", Decimal::new(100, 0));

        let summary = order_summary(&cart, USD);

        assert_eq!(summary.lines().len(), 1);
        assert_eq!(summary.lines().first().map(|l| l.quantity), Some(2));
        assert_eq!(
            summary.lines().first().map(|l| l.subtotal.as_str()),
            Some("$200.00")
        );
        assert_eq!(summary.total(), Some("$200.00"));
    }

    #[test]
    fn total_sums_all_lines() {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p2", "Plan B", Decimal::new(800, 0));
        cart.add("p3", "Plan C", Decimal::new(1_999, 2));

        assert_eq!(order_summary(&cart, USD).total(), Some("$919.99"));
    }

    #[test]
    fn catalog_cards_follow_catalog_order() -> TestResult {
        let catalog = storefront_catalog()?;

        let cards = catalog_cards(&catalog);
        let first = cards.first().ok_or("expected a card")?;

        assert_eq!(cards.len(), 3);
        assert_eq!(first.id, "p1");
        assert_eq!(first.price, "$100.00");
        assert_eq!(first.image, "assets/premium1.jpg");
        assert_eq!(first.default_quantity, 1);

        Ok(())
    }

    #[test]
    fn badge_text_is_unit_count() {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p1", "Plan A", Decimal::new(100, 0));
        cart.add("p2", "Plan B", Decimal::new(800, 0));

        assert_eq!(badge_text(&cart), "3");
        assert_eq!(badge_text(&Cart::new()), "0");
    }
}

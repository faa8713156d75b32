//! Products

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

/// Product offered in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product identifier, referenced by cart line items.
    pub id: String,

    /// Display title
    pub title: String,

    /// Unit price
    pub price: Decimal,

    /// Image reference (relative URL or path)
    pub image: String,
}

/// Static, ordered list of products for sale.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a catalog from products already checked for unique ids.
    #[must_use]
    pub fn new(products: Vec<Product>, currency: &'static Currency) -> Self {
        Self { products, currency }
    }

    /// Find a product by id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Iterate over the products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all catalog prices are expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

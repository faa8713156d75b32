//! Fixtures

use std::{collections::HashSet, fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, PHP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Catalog, Product};

/// Catalog bundled with the storefront.
pub const STOREFRONT_PRODUCTS_YAML: &str = include_str!("../fixtures/products/storefront.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The same product id appears more than once
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// No products in the fixture
    #[error("No products found in fixture")]
    NoProducts,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product title
    pub title: String,

    /// Product price (e.g., "100.00 USD")
    pub price: String,

    /// Product image reference
    pub image: String,
}

/// Load the catalog bundled with the storefront.
///
/// # Errors
///
/// Returns a `FixtureError` if the bundled fixture is invalid.
pub fn storefront_catalog() -> Result<Catalog, FixtureError> {
    load_catalog(STOREFRONT_PRODUCTS_YAML)
}

/// Load a catalog from a YAML file on disk.
///
/// # Errors
///
/// Returns a `FixtureError` if the file cannot be read or is invalid.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let yaml = fs::read_to_string(path)?;

    load_catalog(&yaml)
}

/// Parse products fixture content into a catalog.
///
/// # Errors
///
/// Returns an error when the YAML is malformed, a price is invalid, currencies are inconsistent
/// across products, an id is repeated, or no products are present.
pub fn load_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

    let mut products = Vec::with_capacity(fixture.products.len());
    let mut seen_ids = HashSet::new();
    let mut currency: Option<&'static Currency> = None;

    for product_fixture in fixture.products {
        let (price, parsed_currency) = parse_price(&product_fixture.price)?;

        if let Some(existing_currency) = currency
            && existing_currency != parsed_currency
        {
            return Err(FixtureError::CurrencyMismatch(
                existing_currency.iso_alpha_code.to_string(),
                parsed_currency.iso_alpha_code.to_string(),
            ));
        }

        currency = Some(parsed_currency);

        if !seen_ids.insert(product_fixture.id.clone()) {
            return Err(FixtureError::DuplicateProduct(product_fixture.id));
        }

        products.push(Product {
            id: product_fixture.id,
            title: product_fixture.title,
            price,
            image: product_fixture.image,
        });
    }

    let currency = currency.ok_or(FixtureError::NoProducts)?;

    Ok(Catalog::new(products, currency))
}

/// Parse price string (e.g., "100.00 USD") into a decimal amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is not a
/// non-negative decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        "PHP" => PHP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_catalog_loads_in_order() -> TestResult {
        let catalog = storefront_catalog()?;

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(catalog.currency(), USD);
        assert_eq!(
            catalog.find("p2").map(|p| p.price),
            Some(Decimal::new(800, 0))
        );

        Ok(())
    }

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (amount, currency) = parse_price("19.99 GBP")?;

        assert_eq!(amount, Decimal::new(1_999, 2));
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_bad_input() {
        assert!(matches!(
            parse_price("19.99"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("abc USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("-1.00 USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("1.00 XYZ"),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = r"
products:
  - id: a
    title: A
    price: 1.00 USD
    image: a.jpg
  - id: b
    title: B
    price: 1.00 GBP
    image: b.jpg
";

        assert!(matches!(
            load_catalog(yaml),
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "USD" && found == "GBP"
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r"
products:
  - id: a
    title: A
    price: 1.00 USD
    image: a.jpg
  - id: a
    title: A again
    price: 2.00 USD
    image: a.jpg
";

        assert!(matches!(
            load_catalog(yaml),
            Err(FixtureError::DuplicateProduct(id)) if id == "a"
        ));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            load_catalog("products: []"),
            Err(FixtureError::NoProducts)
        ));
    }

    #[test]
    fn load_catalog_file_reads_from_disk() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("products.yml");

        fs::write(&path, STOREFRONT_PRODUCTS_YAML)?;

        let catalog = load_catalog_file(&path)?;

        assert_eq!(catalog.len(), 3);

        Ok(())
    }
}

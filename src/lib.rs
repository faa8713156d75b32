//! Storefront
//!
//! Storefront is a browser-local shopping cart: a product catalog, a cart persisted in a single
//! key-value slot, pure view projections of both, and a checkout flow that submits one order to a
//! remote endpoint.

pub mod actions;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod observers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod render;
pub mod service;
pub mod store;

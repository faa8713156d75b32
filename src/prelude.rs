//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    actions::{CartAction, Control, parse_quantity, step_selector},
    cart::{Cart, LineItem},
    checkout::{
        Checkout, CheckoutError, CheckoutForm, CheckoutReceipt, HttpOrderTransport, Order,
        OrderAccepted, OrderTransport, SubmitError, ValidationError,
    },
    config::StorefrontConfig,
    fixtures::{FixtureError, load_catalog, load_catalog_file, storefront_catalog},
    observers::{BadgeSlot, BadgeUpdater, CartEvent, CartObserver},
    products::{Catalog, Product},
    render::{CatalogCard, OrderSummary, SummaryLine, catalog_cards, order_summary},
    service::{CartError, CartService},
    store::{
        CART_STORAGE_KEY, CartStore, KeyValueStorage, MemoryStorage, StorageError, StoreError,
    },
};

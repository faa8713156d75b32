//! Cart service
//!
//! Every mutation follows the same cycle: load the cart from its slot, apply the change to the
//! value, save it back, then notify observers.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    actions::CartAction,
    cart::{Cart, clamp_quantity},
    observers::{CartEvent, CartObserver},
    products::{Catalog, Product},
    store::{CartStore, KeyValueStorage, StoreError},
};

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An add action referenced a product missing from the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),
}

/// Applies cart mutations against a store and notifies observers.
pub struct CartService<S> {
    store: CartStore<S>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KeyValueStorage> CartService<S> {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified after each saved change.
    #[must_use]
    pub fn with_observer(mut self, observer: impl CartObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));

        self
    }

    /// The cart as currently stored.
    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Total number of units in the stored cart.
    pub fn count(&self) -> u64 {
        self.store.count()
    }

    /// Add one unit of a product, appending a new line when needed.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart cannot be saved.
    pub fn add_item(&self, id: &str, title: &str, price: Decimal) -> Result<Cart, CartError> {
        self.add_units(id, title, price, 1)
    }

    /// Add `quantity` units of a catalog product (at least one) in a single change.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart cannot be saved.
    pub fn add_product(&self, product: &Product, quantity: i64) -> Result<Cart, CartError> {
        self.add_units(
            &product.id,
            &product.title,
            product.price,
            clamp_quantity(quantity),
        )
    }

    fn add_units(
        &self,
        id: &str,
        title: &str,
        price: Decimal,
        units: u32,
    ) -> Result<Cart, CartError> {
        let mut cart = self.store.load();
        let quantity = cart.add_units(id, title, price, units);

        self.commit(
            &cart,
            &CartEvent::ItemAdded {
                id: id.to_string(),
                title: title.to_string(),
                added: units,
                quantity,
            },
        )?;

        Ok(cart)
    }

    /// Remove a line. Observers are notified even when the line was already gone.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart cannot be saved.
    pub fn remove_item(&self, id: &str) -> Result<Cart, CartError> {
        let mut cart = self.store.load();

        if !cart.remove(id) {
            debug!("remove requested for missing cart line {id}");
        }

        self.commit(&cart, &CartEvent::ItemRemoved { id: id.to_string() })?;

        Ok(cart)
    }

    /// Set the quantity of a line, clamped to at least 1. A missing line is left alone.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart cannot be saved.
    pub fn set_quantity(&self, id: &str, quantity: i64) -> Result<Cart, CartError> {
        self.change_quantity(id, |cart| cart.set_quantity(id, quantity))
    }

    /// Change the quantity of a line by `delta`, clamped to at least 1. A missing line is left
    /// alone.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart cannot be saved.
    pub fn adjust_quantity(&self, id: &str, delta: i64) -> Result<Cart, CartError> {
        self.change_quantity(id, |cart| cart.adjust_quantity(id, delta))
    }

    fn change_quantity(
        &self,
        id: &str,
        change: impl FnOnce(&mut Cart) -> Option<u32>,
    ) -> Result<Cart, CartError> {
        let mut cart = self.store.load();

        let Some(quantity) = change(&mut cart) else {
            debug!("quantity change requested for missing cart line {id}");

            return Ok(cart);
        };

        self.commit(
            &cart,
            &CartEvent::QuantityChanged {
                id: id.to_string(),
                quantity,
            },
        )?;

        Ok(cart)
    }

    /// Remove the cart slot entirely.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the storage rejects the removal.
    pub fn clear(&self) -> Result<(), CartError> {
        self.store.clear()?;

        self.notify(&CartEvent::Cleared, &Cart::new());

        Ok(())
    }

    /// Apply a user action.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` when an add action names a product missing from the
    /// catalog, or a store error if the cart cannot be saved.
    pub fn dispatch(&self, action: &CartAction, catalog: &Catalog) -> Result<Cart, CartError> {
        match action {
            CartAction::Add {
                product_id,
                quantity,
            } => {
                let product = catalog
                    .find(product_id)
                    .ok_or_else(|| CartError::UnknownProduct(product_id.clone()))?;

                self.add_product(product, *quantity)
            }
            CartAction::Remove { id } => self.remove_item(id),
            CartAction::Adjust { id, delta } => self.adjust_quantity(id, *delta),
            CartAction::SetQuantity { id, quantity } => self.set_quantity(id, *quantity),
        }
    }

    fn commit(&self, cart: &Cart, event: &CartEvent) -> Result<(), CartError> {
        self.store.save(cart)?;

        self.notify(event, cart);

        Ok(())
    }

    fn notify(&self, event: &CartEvent, cart: &Cart) {
        for observer in &self.observers {
            observer.cart_changed(event, cart);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for CartService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartService")
            .field("store", &self.store)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::store::{CART_STORAGE_KEY, MemoryStorage};

    use super::*;

    type EventLog = Rc<RefCell<Vec<CartEvent>>>;

    fn service_with_log() -> (CartService<Rc<MemoryStorage>>, Rc<MemoryStorage>, EventLog) {
        let storage = Rc::new(MemoryStorage::new());
        let log: EventLog = Rc::default();
        let sink = Rc::clone(&log);

        let service = CartService::new(CartStore::new(Rc::clone(&storage))).with_observer(
            move |event: &CartEvent, _cart: &Cart| sink.borrow_mut().push(event.clone()),
        );

        (service, storage, log)
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Product {
                id: "p1".to_string(),
                title: "Plan A".to_string(),
                price: Decimal::new(100, 0),
                image: "a.jpg".to_string(),
            }],
            USD,
        )
    }

    #[test]
    fn add_item_persists_and_notifies() -> TestResult {
        let (service, storage, log) = service_with_log();

        service.add_item("p1", "Plan A", Decimal::new(100, 0))?;
        let cart = service.add_item("p1", "Plan A", Decimal::new(100, 0))?;

        assert_eq!(cart.get("p1").map(|l| l.quantity), Some(2));
        assert_eq!(service.count(), 2);
        assert!(storage.get(CART_STORAGE_KEY)?.is_some());
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(
            log.borrow().last(),
            Some(&CartEvent::ItemAdded {
                id: "p1".to_string(),
                title: "Plan A".to_string(),
                added: 1,
                quantity: 2,
            })
        );

        Ok(())
    }

    #[test]
    fn add_product_adds_selected_quantity_once() -> TestResult {
        let (service, _storage, log) = service_with_log();
        let catalog = catalog();
        let product = catalog.find("p1").ok_or("missing product")?;

        let cart = service.add_product(product, 3)?;
        let cart_after_zero = service.add_product(product, 0)?;

        assert_eq!(cart.count(), 3);
        assert_eq!(cart_after_zero.count(), 4);
        assert_eq!(log.borrow().len(), 2);

        Ok(())
    }

    #[test]
    fn remove_item_notifies_even_when_missing() -> TestResult {
        let (service, _storage, log) = service_with_log();

        service.add_item("p1", "Plan A", Decimal::new(100, 0))?;
        service.remove_item("p1")?;
        service.remove_item("p1")?;

        assert_eq!(service.count(), 0);
        assert_eq!(log.borrow().len(), 3);

        Ok(())
    }

    #[test]
    fn set_quantity_on_missing_line_does_not_save_or_notify() -> TestResult {
        let (service, storage, log) = service_with_log();

        let cart = service.set_quantity("p1", 5)?;

        assert!(cart.is_empty());
        assert_eq!(storage.get(CART_STORAGE_KEY)?, None);
        assert!(log.borrow().is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_clamps_non_positive_values() -> TestResult {
        let (service, _storage, _log) = service_with_log();

        service.add_item("p1", "Plan A", Decimal::new(100, 0))?;
        service.set_quantity("p1", 7)?;
        service.set_quantity("p1", -3)?;

        assert_eq!(service.cart().get("p1").map(|l| l.quantity), Some(1));

        Ok(())
    }

    #[test]
    fn adjust_quantity_steps_and_clamps() -> TestResult {
        let (service, _storage, log) = service_with_log();

        service.add_item("p1", "Plan A", Decimal::new(100, 0))?;
        service.adjust_quantity("p1", 1)?;
        service.adjust_quantity("p1", 1)?;
        let cart = service.adjust_quantity("p1", -5)?;

        assert_eq!(cart.get("p1").map(|l| l.quantity), Some(1));
        assert_eq!(
            log.borrow().last(),
            Some(&CartEvent::QuantityChanged {
                id: "p1".to_string(),
                quantity: 1,
            })
        );

        Ok(())
    }

    #[test]
    fn clear_removes_slot_and_notifies() -> TestResult {
        let (service, storage, log) = service_with_log();

        service.add_item("p1", "Plan A", Decimal::new(100, 0))?;
        service.clear()?;

        assert_eq!(storage.get(CART_STORAGE_KEY)?, None);
        assert_eq!(service.count(), 0);
        assert_eq!(log.borrow().last(), Some(&CartEvent::Cleared));

        Ok(())
    }

    #[test]
    fn dispatch_rejects_unknown_products() -> TestResult {
        let (service, _storage, log) = service_with_log();

        let result = service.dispatch(
            &CartAction::Add {
                product_id: "nope".to_string(),
                quantity: 1,
            },
            &catalog(),
        );

        assert!(matches!(result, Err(CartError::UnknownProduct(id)) if id == "nope"));
        assert!(log.borrow().is_empty());
        assert_eq!(service.count(), 0);

        Ok(())
    }

    #[test]
    fn dispatch_routes_each_action() -> TestResult {
        let (service, _storage, _log) = service_with_log();
        let catalog = catalog();

        service.dispatch(
            &CartAction::Add {
                product_id: "p1".to_string(),
                quantity: 2,
            },
            &catalog,
        )?;
        service.dispatch(
            &CartAction::Adjust {
                id: "p1".to_string(),
                delta: 1,
            },
            &catalog,
        )?;

        assert_eq!(service.count(), 3);

        service.dispatch(
            &CartAction::SetQuantity {
                id: "p1".to_string(),
                quantity: 10,
            },
            &catalog,
        )?;

        assert_eq!(service.count(), 10);

        service.dispatch(
            &CartAction::Remove {
                id: "p1".to_string(),
            },
            &catalog,
        )?;

        assert_eq!(service.count(), 0);

        Ok(())
    }

    #[test]
    fn huge_add_quantity_saturates_the_line() -> TestResult {
        let (service, storage, log) = service_with_log();
        let action = CartAction::Add {
            product_id: "p1".to_string(),
            quantity: i64::MAX,
        };

        let cart = service.dispatch(&action, &catalog())?;

        assert_eq!(cart.get("p1").map(|item| item.quantity), Some(u32::MAX));
        assert_eq!(
            CartStore::new(Rc::clone(&storage)).load().get("p1").map(|item| item.quantity),
            Some(u32::MAX)
        );
        assert_eq!(log.borrow().len(), 1);

        Ok(())
    }
}

//! Cart observers
//!
//! Observers are told about every persisted cart change so views (badges, the order summary, the
//! acknowledgment banner) can refresh themselves.

use std::fmt;

use crate::cart::Cart;

/// A persisted change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Units of a product were added.
    ItemAdded {
        /// Product id
        id: String,

        /// Product title, for the acknowledgment message
        title: String,

        /// Units added by this change
        added: u32,

        /// Quantity of the line after the change
        quantity: u32,
    },

    /// A line was removed (or a remove was requested for a missing line).
    ItemRemoved {
        /// Product id
        id: String,
    },

    /// The quantity of a line changed.
    QuantityChanged {
        /// Product id
        id: String,

        /// Quantity of the line after the change
        quantity: u32,
    },

    /// The cart slot was cleared.
    Cleared,
}

impl CartEvent {
    /// User-facing acknowledgment for this change, if one should be shown.
    #[must_use]
    pub fn acknowledgment(&self) -> Option<String> {
        match self {
            Self::ItemAdded { title, .. } => Some(format!("{title} added to cart!")),
            Self::ItemRemoved { .. } | Self::QuantityChanged { .. } | Self::Cleared => None,
        }
    }
}

/// Receives cart changes after they have been saved.
pub trait CartObserver {
    /// Called with the change and the cart as it is now stored.
    fn cart_changed(&self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent, &Cart),
{
    fn cart_changed(&self, event: &CartEvent, cart: &Cart) {
        self(event, cart);
    }
}

/// A display slot showing the number of units in the cart.
pub trait BadgeSlot {
    /// Show `count` in the slot.
    ///
    /// Returns `false` when the slot does not exist in the current view.
    fn show_count(&self, count: u64) -> bool;
}

/// Writes the cart's unit count into every badge slot that exists.
pub struct BadgeUpdater<T> {
    slots: Vec<T>,
}

impl<T: BadgeSlot> BadgeUpdater<T> {
    /// Create an updater over the given slots.
    #[must_use]
    pub fn new(slots: impl Into<Vec<T>>) -> Self {
        Self {
            slots: slots.into(),
        }
    }

    /// Write `count` into each slot, skipping slots that are missing.
    ///
    /// Returns the number of slots that were updated.
    pub fn update(&self, count: u64) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.show_count(count))
            .count()
    }
}

impl<T> fmt::Debug for BadgeUpdater<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeUpdater")
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<T: BadgeSlot> CartObserver for BadgeUpdater<T> {
    fn cart_changed(&self, _event: &CartEvent, cart: &Cart) {
        self.update(cart.count());
    }
}

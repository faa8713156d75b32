//! Checkout form

use thiserror::Error;

use crate::cart::Cart;

/// Message shown when the form or cart is not ready for checkout.
pub const VALIDATION_MESSAGE: &str =
    "Please enter name, address and add at least one product to cart.";

/// Reasons a checkout is rejected before anything is sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The name field is blank.
    #[error("customer name is required")]
    MissingName,

    /// The address field is blank.
    #[error("delivery address is required")]
    MissingAddress,

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,
}

/// Raw checkout form input, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Customer name (required)
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Delivery address (required)
    pub address: String,

    /// Free-form notes
    pub notes: String,
}

/// Trimmed customer details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Customer name, never blank
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Delivery address, never blank
    pub address: String,

    /// Free-form notes
    pub notes: String,
}

impl CheckoutForm {
    /// Trim every field and check the form and cart are ready for checkout.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the trimmed name or address is blank, or the cart is empty.
    pub fn validate(&self, cart: &Cart) -> Result<CustomerDetails, ValidationError> {
        let details = CustomerDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            notes: self.notes.trim().to_string(),
        };

        if details.name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        if details.address.is_empty() {
            return Err(ValidationError::MissingAddress);
        }

        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        Ok(details)
    }
}

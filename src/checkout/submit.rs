//! Checkout submission

use jiff::Timestamp;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    checkout::{
        form::{CheckoutForm, VALIDATION_MESSAGE, ValidationError},
        order::Order,
        transport::{OrderTransport, SubmitError},
    },
    config::LANDING_PAGE,
    service::CartService,
    store::KeyValueStorage,
};

/// Message shown after the endpoint accepts an order.
pub const ORDER_SUBMITTED_MESSAGE: &str = "Order submitted!";

/// Errors that end a checkout attempt. The cart is left untouched in every case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form or cart failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The order was sent but not accepted.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl CheckoutError {
    /// Message to show the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => VALIDATION_MESSAGE.to_string(),
            Self::Submit(source) => format!("Failed to submit order: {source}"),
        }
    }
}

/// Outcome of an accepted checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// The order as sent
    pub order: Order,

    /// Confirmation from the endpoint, if it sent one
    pub server_message: Option<String>,

    /// Page to navigate to next
    pub redirect_to: String,
}

impl CheckoutReceipt {
    /// Message to show the visitor.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        ORDER_SUBMITTED_MESSAGE
    }
}

/// Validates a checkout form, sends the order, and clears the cart once it is accepted.
///
/// Each call to [`Checkout::submit`] makes exactly one attempt; failed attempts are retried only
/// by the visitor submitting again.
#[derive(Debug)]
pub struct Checkout<'a, S, T> {
    cart: &'a CartService<S>,
    transport: &'a T,
    landing_page: String,
}

impl<'a, S, T> Checkout<'a, S, T>
where
    S: KeyValueStorage,
    T: OrderTransport,
{
    /// Create a checkout over a cart service and an order transport.
    #[must_use]
    pub fn new(cart: &'a CartService<S>, transport: &'a T) -> Self {
        Self {
            cart,
            transport,
            landing_page: LANDING_PAGE.to_string(),
        }
    }

    /// Navigate somewhere other than the default landing page after success.
    #[must_use]
    pub fn with_landing_page(mut self, landing_page: impl Into<String>) -> Self {
        self.landing_page = landing_page.into();

        self
    }

    /// Validate the form against the stored cart and build the order to send.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` if the name or address is blank or the cart is empty.
    pub fn prepare<R: Rng>(
        &self,
        form: &CheckoutForm,
        created_at: Timestamp,
        rng: &mut R,
    ) -> Result<Order, CheckoutError> {
        let cart = self.cart.cart();
        let customer = form.validate(&cart)?;

        Ok(Order::new(customer, &cart, created_at, rng))
    }

    /// Validate, send, and on acceptance clear the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if validation fails or the order is not accepted. The cart is
    /// unchanged in both cases.
    pub async fn submit(&self, form: &CheckoutForm) -> Result<CheckoutReceipt, CheckoutError> {
        let order = self.prepare(form, Timestamp::now(), &mut rand::thread_rng())?;

        self.send(order).await
    }

    /// Send an already prepared order and clear the cart once it is accepted.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Submit` if the order is not accepted.
    pub async fn send(&self, order: Order) -> Result<CheckoutReceipt, CheckoutError> {
        info!(
            order_id = order.id(),
            items = order.items().len(),
            "submitting order"
        );

        let accepted = match self.transport.send_order(&order).await {
            Ok(accepted) => accepted,
            Err(source) => {
                error!(order_id = order.id(), "order submission failed: {source}");

                return Err(source.into());
            }
        };

        info!(order_id = order.id(), "order accepted");

        // Accepted orders stay accepted; a failed clear is only logged.
        if let Err(source) = self.cart.clear() {
            error!(
                order_id = order.id(),
                "failed to clear cart after accepted order: {source}"
            );
        }

        Ok(CheckoutReceipt {
            order,
            server_message: accepted.message,
            redirect_to: self.landing_page.clone(),
        })
    }
}

//! Checkout
//!
//! Turns the cart and the checkout form into an [`Order`] and delivers it to the order endpoint.

pub mod form;
pub mod order;
pub mod submit;
pub mod transport;

pub use form::{CheckoutForm, CustomerDetails, VALIDATION_MESSAGE, ValidationError};
pub use order::{ORDER_ID_PREFIX, Order, generate_order_id};
pub use submit::{Checkout, CheckoutError, CheckoutReceipt, ORDER_SUBMITTED_MESSAGE};
pub use transport::{
    DEFAULT_REJECTION_MESSAGE, HttpOrderTransport, OrderAccepted, OrderTransport, SubmitError,
    interpret_response,
};

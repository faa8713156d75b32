//! Order transport

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::checkout::order::Order;

/// Message used when the endpoint rejects an order without explaining why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Request failed";

/// Errors that can occur when sending an order.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Server-provided message, or a generic one
        message: String,
    },

    /// The endpoint's response body was not JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// An order the endpoint accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAccepted {
    /// Server-provided confirmation message, if any
    pub message: Option<String>,
}

/// Delivers orders to the order-receiving service.
pub trait OrderTransport {
    /// Send one order. Implementations make a single attempt.
    ///
    /// # Errors
    ///
    /// Returns a `SubmitError` if the order was not accepted.
    async fn send_order(&self, order: &Order) -> Result<OrderAccepted, SubmitError>;
}

/// Interpret the endpoint's answer.
///
/// The body must be JSON regardless of status. A success status accepts the order; anything else
/// rejects it with the body's `message` field when present.
///
/// # Errors
///
/// Returns `SubmitError::MalformedResponse` for a non-JSON body and `SubmitError::Rejected` for a
/// non-success status.
pub fn interpret_response(status: u16, body: &str) -> Result<OrderAccepted, SubmitError> {
    let parsed: Value = serde_json::from_str(body)?;

    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string);

    if (200..300).contains(&status) {
        return Ok(OrderAccepted { message });
    }

    Err(SubmitError::Rejected {
        status,
        message: message.unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
    })
}

/// Posts orders as JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpOrderTransport {
    endpoint: String,
    http: Client,
}

impl HttpOrderTransport {
    /// Create a transport posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    /// Endpoint orders are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OrderTransport for HttpOrderTransport {
    async fn send_order(&self, order: &Order) -> Result<OrderAccepted, SubmitError> {
        let response = self.http.post(&self.endpoint).json(order).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret_response(status, &body)
    }
}

//! Integration tests for the checkout flow against a scripted order endpoint.

use std::{cell::RefCell, rc::Rc};

use jiff::Timestamp;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use testresult::TestResult;

use storefront::{
    checkout::{
        Checkout, CheckoutError, CheckoutForm, ORDER_SUBMITTED_MESSAGE, Order, OrderAccepted,
        OrderTransport, SubmitError, VALIDATION_MESSAGE, ValidationError, interpret_response,
    },
    observers::CartEvent,
    service::CartService,
    store::{CART_STORAGE_KEY, CartStore, KeyValueStorage, MemoryStorage},
};

/// Order endpoint answering every request with the same status and body.
struct ScriptedEndpoint {
    status: u16,
    body: String,
    received: RefCell<Vec<Order>>,
}

impl ScriptedEndpoint {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            received: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.received.borrow().len()
    }
}

impl OrderTransport for ScriptedEndpoint {
    async fn send_order(&self, order: &Order) -> Result<OrderAccepted, SubmitError> {
        self.received.borrow_mut().push(order.clone());

        interpret_response(self.status, &self.body)
    }
}

fn form(name: &str, address: &str) -> CheckoutForm {
    CheckoutForm {
        name: name.to_string(),
        email: "ana@example.com".to_string(),
        phone: "0917 000 0000".to_string(),
        address: address.to_string(),
        notes: "Leave at the gate".to_string(),
    }
}

fn cart_with_one_item() -> TestResult<(CartService<Rc<MemoryStorage>>, Rc<MemoryStorage>)> {
    let storage = Rc::new(MemoryStorage::new());
    let service = CartService::new(CartStore::new(Rc::clone(&storage)));

    service.add_item("p1", "Plan A", Decimal::new(100, 0))?;

    Ok((service, storage))
}

#[tokio::test]
async fn blank_name_is_rejected_without_a_request() -> TestResult {
    let (service, storage) = cart_with_one_item()?;
    let endpoint = ScriptedEndpoint::new(200, r#"{"ok":true}"#);

    let result = Checkout::new(&service, &endpoint)
        .submit(&form("", "123 St"))
        .await;

    let Err(error) = result else {
        return Err("expected validation failure".into());
    };

    assert!(matches!(
        error,
        CheckoutError::Validation(ValidationError::MissingName)
    ));
    assert_eq!(error.user_message(), VALIDATION_MESSAGE);
    assert_eq!(endpoint.request_count(), 0);
    assert!(storage.get(CART_STORAGE_KEY)?.is_some());

    Ok(())
}

#[tokio::test]
async fn empty_cart_is_rejected_without_a_request() -> TestResult {
    let service = CartService::new(CartStore::new(MemoryStorage::new()));
    let endpoint = ScriptedEndpoint::new(200, r#"{"ok":true}"#);

    let result = Checkout::new(&service, &endpoint)
        .submit(&form("Ana", "123 St"))
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::Validation(ValidationError::EmptyCart))
    ));
    assert_eq!(endpoint.request_count(), 0);

    Ok(())
}

#[tokio::test]
async fn accepted_order_clears_the_cart() -> TestResult {
    let (service, storage) = cart_with_one_item()?;
    let cleared = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&cleared);
    let service = service.with_observer(move |event: &CartEvent, _cart: &storefront::cart::Cart| {
        if *event == CartEvent::Cleared {
            *flag.borrow_mut() = true;
        }
    });
    let endpoint = ScriptedEndpoint::new(200, r#"{"ok":true,"message":"Order emailed successfully"}"#);

    let receipt = Checkout::new(&service, &endpoint)
        .submit(&form("  Ana ", " 123 St "))
        .await?;

    assert_eq!(storage.get(CART_STORAGE_KEY)?, None);
    assert_eq!(service.count(), 0);
    assert!(*cleared.borrow(), "badges should be refreshed after checkout");
    assert_eq!(receipt.redirect_to, "index.html");
    assert_eq!(receipt.user_message(), ORDER_SUBMITTED_MESSAGE);
    assert_eq!(
        receipt.server_message.as_deref(),
        Some("Order emailed successfully")
    );
    assert_eq!(endpoint.request_count(), 1);

    let sent = endpoint.received.borrow();
    let order = sent.first().ok_or("expected a sent order")?;

    assert_eq!(order.name(), "Ana");
    assert_eq!(order.address(), "123 St");
    assert_eq!(order.subtotal(), Decimal::new(100, 0));
    assert_eq!(order.items().len(), 1);
    assert!(order.id().starts_with("MO-"));

    Ok(())
}

#[tokio::test]
async fn rejected_order_keeps_the_cart_and_reports_the_server_message() -> TestResult {
    let (service, storage) = cart_with_one_item()?;
    let before = storage.get(CART_STORAGE_KEY)?;
    let endpoint = ScriptedEndpoint::new(409, r#"{"ok":false,"message":"Out of stock"}"#);

    let result = Checkout::new(&service, &endpoint)
        .submit(&form("Ana", "123 St"))
        .await;

    let Err(error) = result else {
        return Err("expected rejection".into());
    };

    assert_eq!(error.user_message(), "Failed to submit order: Out of stock");
    assert_eq!(storage.get(CART_STORAGE_KEY)?, before);
    assert_eq!(service.count(), 1);

    Ok(())
}

#[tokio::test]
async fn malformed_response_keeps_the_cart() -> TestResult {
    let (service, _storage) = cart_with_one_item()?;
    let endpoint = ScriptedEndpoint::new(200, "Internal Server Error");

    let result = Checkout::new(&service, &endpoint)
        .submit(&form("Ana", "123 St"))
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::Submit(SubmitError::MalformedResponse(_)))
    ));
    assert_eq!(service.count(), 1);

    Ok(())
}

#[tokio::test]
async fn each_submit_is_a_single_attempt() -> TestResult {
    let (service, _storage) = cart_with_one_item()?;
    let endpoint = ScriptedEndpoint::new(503, "{}");
    let checkout = Checkout::new(&service, &endpoint);

    for _ in 0..2 {
        let result = checkout.submit(&form("Ana", "123 St")).await;

        assert!(matches!(
            result,
            Err(CheckoutError::Submit(SubmitError::Rejected { status: 503, .. }))
        ));
    }

    assert_eq!(endpoint.request_count(), 2);
    assert_eq!(service.count(), 1);

    Ok(())
}

#[tokio::test]
async fn prepared_order_is_sent_as_built() -> TestResult {
    let (service, _storage) = cart_with_one_item()?;
    let endpoint = ScriptedEndpoint::new(200, "{}");
    let checkout = Checkout::new(&service, &endpoint).with_landing_page("thanks.html");
    let created_at: Timestamp = "2026-10-19T08:30:00Z".parse()?;

    let order = checkout.prepare(
        &form("Ana", "123 St"),
        created_at,
        &mut StdRng::seed_from_u64(3),
    )?;
    let receipt = checkout.send(order.clone()).await?;

    assert_eq!(receipt.order, order);
    assert_eq!(receipt.redirect_to, "thanks.html");
    assert_eq!(receipt.server_message, None);
    assert_eq!(
        endpoint.received.borrow().first().map(Order::created_at),
        Some(created_at)
    );

    Ok(())
}

use leptos::{ev::SubmitEvent, prelude::*, task};
use tracing::info;

use storefront::checkout::{
    Checkout, CheckoutError, CheckoutForm, CheckoutReceipt, HttpOrderTransport,
};

use crate::Storefront;

/// Message to alert and page to navigate to once a submission settles.
fn outcome(result: Result<CheckoutReceipt, CheckoutError>) -> (String, Option<String>) {
    match result {
        Ok(receipt) => (
            receipt.user_message().to_string(),
            Some(receipt.redirect_to),
        ),
        Err(error) => (error.user_message(), None),
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        _ = window.alert_with_message(message);
    }
}

fn navigate(page: &str) {
    if let Some(window) = web_sys::window() {
        _ = window.location().set_href(page);
    }
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>, required: bool) -> impl IntoView {
    view! {
        <label class="flex flex-col gap-1 text-sm">
            <span>{label}</span>
            <input
                type="text"
                class="rounded border border-slate-300 px-2 py-1"
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Customer details form that submits the cart as an order.
#[component]
pub(crate) fn CheckoutPanel(storefront: Storefront) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let form = CheckoutForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            address: address.get_untracked(),
            notes: notes.get_untracked(),
        };
        let service = storefront.cart.get_value();
        let config = storefront.config.get_value();

        task::spawn_local(async move {
            let transport = HttpOrderTransport::new(config.checkout_endpoint);

            info!(endpoint = transport.endpoint(), "submitting checkout form");

            let result = Checkout::new(&service, &transport)
                .with_landing_page(config.landing_page)
                .submit(&form)
                .await;

            let (message, redirect) = outcome(result);

            alert(&message);

            if let Some(page) = redirect {
                navigate(&page);
            }
        });
    };

    view! {
        <section class="rounded-lg border border-slate-200 bg-white p-4">
            <h2 class="panel-title">"Checkout"</h2>
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <TextField label="Name" value=name required=true />
                <TextField label="Email" value=email required=false />
                <TextField label="Phone" value=phone required=false />
                <TextField label="Address" value=address required=true />
                <label class="flex flex-col gap-1 text-sm">
                    <span>"Notes"</span>
                    <textarea
                        class="rounded border border-slate-300 px-2 py-1"
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button type="submit" class="rounded bg-slate-900 px-3 py-2 text-white">
                    "Place order"
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rand::{SeedableRng, rngs::StdRng};
    use storefront::{
        cart::Cart,
        checkout::{Order, VALIDATION_MESSAGE, ValidationError},
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepted_order_alerts_and_redirects() -> TestResult {
        let mut cart = Cart::new();
        cart.add("p1", "Plan A", "100".parse()?);

        let form = CheckoutForm {
            name: "Ana".to_string(),
            address: "123 St".to_string(),
            ..CheckoutForm::default()
        };
        let order = Order::new(
            form.validate(&cart)?,
            &cart,
            Timestamp::UNIX_EPOCH,
            &mut StdRng::seed_from_u64(1),
        );

        let (message, redirect) = outcome(Ok(CheckoutReceipt {
            order,
            server_message: None,
            redirect_to: "index.html".to_string(),
        }));

        assert_eq!(message, "Order submitted!");
        assert_eq!(redirect.as_deref(), Some("index.html"));

        Ok(())
    }

    #[test]
    fn failed_checkout_alerts_without_redirect() {
        let (message, redirect) = outcome(Err(CheckoutError::Validation(
            ValidationError::MissingAddress,
        )));

        assert_eq!(message, VALIDATION_MESSAGE);
        assert_eq!(redirect, None);
    }
}

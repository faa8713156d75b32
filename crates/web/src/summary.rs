use leptos::prelude::*;

use storefront::{
    actions::Control,
    render::{OrderSummary, SummaryLine, order_summary},
};

use crate::Storefront;

#[component]
fn SummaryRow(line: SummaryLine, storefront: Storefront) -> impl IntoView {
    let decrement_id = line.id.clone();
    let input_id = line.id.clone();
    let increment_id = line.id.clone();
    let remove_id = line.id.clone();
    let remove_label = format!("Remove {}", line.title);

    view! {
        <li class="summary-line flex items-center justify-between gap-2 py-2">
            <div>
                <p class="summary-title">{line.title}</p>
                <p class="summary-unit-price text-sm text-slate-500">{line.unit_price}</p>
            </div>
            <div class="quantity-controls flex items-center gap-1">
                <button
                    type="button"
                    aria-label="Decrease quantity"
                    on:click=move |_| storefront.apply(Control::DecrementItem, &decrement_id, None)
                >
                    "−"
                </button>
                <input
                    type="number"
                    min="1"
                    aria-label="Quantity"
                    prop:value=line.quantity.to_string()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);

                        storefront.apply(Control::QuantityInput, &input_id, Some(&value));
                    }
                />
                <button
                    type="button"
                    aria-label="Increase quantity"
                    on:click=move |_| storefront.apply(Control::IncrementItem, &increment_id, None)
                >
                    "+"
                </button>
            </div>
            <p class="summary-subtotal">{line.subtotal}</p>
            <button
                type="button"
                class="summary-remove"
                aria-label=remove_label
                on:click=move |_| storefront.apply(Control::RemoveItem, &remove_id, None)
            >
                "Remove"
            </button>
        </li>
    }
}

/// Cart lines with their controls and the grand total, rebuilt after every cart change.
#[component]
pub(crate) fn OrderSummaryPanel(storefront: Storefront) -> impl IntoView {
    let currency = storefront.config.with_value(|config| config.currency);

    view! {
        <section class="rounded-lg border border-slate-200 bg-white p-4">
            <h2 class="panel-title">"Order summary"</h2>
            {move || {
                storefront.revision.track();

                let summary = storefront
                    .cart
                    .with_value(|service| order_summary(&service.cart(), currency));

                match summary {
                    OrderSummary::Empty { message } => view! {
                        <p class="summary-empty text-sm text-slate-500">{message}</p>
                    }
                    .into_any(),
                    OrderSummary::Lines { lines, total } => view! {
                        <ul class="divide-y divide-slate-100">
                            {lines
                                .into_iter()
                                .map(|line| view! { <SummaryRow line=line storefront=storefront /> })
                                .collect_view()}
                        </ul>
                        <p class="summary-total mt-4 font-semibold">"Total: " {total}</p>
                    }
                    .into_any(),
                }
            }}
        </section>
    }
}

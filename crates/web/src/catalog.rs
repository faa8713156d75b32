use leptos::prelude::*;

use storefront::{
    actions::{Control, step_selector},
    render::{CatalogCard, catalog_cards},
};

use crate::Storefront;

#[component]
fn ProductCard(card: CatalogCard, storefront: Storefront) -> impl IntoView {
    let quantity = RwSignal::new(card.default_quantity.to_string());
    let product_id = card.id.clone();
    let image_alt = card.title.clone();

    let step = move |delta: i64| {
        quantity.update(|value| *value = step_selector(value.as_str(), delta).to_string());
    };

    view! {
        <li class="product-card rounded-lg border border-slate-200 bg-white p-4">
            <img class="product-image" src=card.image alt=image_alt />
            <h3 class="product-title">{card.title}</h3>
            <p class="product-description">{card.description}</p>
            <p class="product-price">{card.price}</p>
            <div class="quantity-selector">
                <button type="button" aria-label="Decrease quantity" on:click=move |_| step(-1)>
                    "−"
                </button>
                <input
                    type="number"
                    min="1"
                    aria-label="Quantity"
                    prop:value=move || quantity.get()
                    on:input=move |ev| quantity.set(event_target_value(&ev))
                />
                <button type="button" aria-label="Increase quantity" on:click=move |_| step(1)>
                    "+"
                </button>
            </div>
            <button
                type="button"
                class="add-to-cart"
                on:click=move |_| {
                    let value = quantity.get_untracked();

                    storefront.apply(Control::AddToCart, &product_id, Some(&value));
                }
            >
                "Add to cart"
            </button>
        </li>
    }
}

/// Product grid with a quantity selector and add button per card.
#[component]
pub(crate) fn CatalogGrid(storefront: Storefront) -> impl IntoView {
    let cards = storefront.catalog.with_value(catalog_cards);

    view! {
        <section class="md:col-span-2">
            <h2 class="panel-title">"Plans"</h2>
            <ul class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                {cards
                    .into_iter()
                    .map(|card| view! { <ProductCard card=card storefront=storefront /> })
                    .collect_view()}
            </ul>
        </section>
    }
}

//! Leptos Storefront Application

use std::rc::Rc;

use leptos::prelude::*;
use tracing::{Level, warn};

use storefront::{
    actions::{CartAction, Control},
    cart::Cart,
    config::StorefrontConfig,
    fixtures::storefront_catalog,
    observers::{BadgeUpdater, CartEvent},
    products::Catalog,
    service::CartService,
    store::CartStore,
};

use crate::{badges::HEADER_BADGE_ID, storage::BrowserStorage};

mod badges;
mod catalog;
mod checkout;
mod logging;
mod storage;
mod summary;

/// Cart service shared by every view on the page.
type SharedCart = StoredValue<Rc<CartService<BrowserStorage>>, LocalStorage>;

/// Page state handed to every panel.
#[derive(Clone, Copy)]
struct Storefront {
    /// Cart service backed by `localStorage`.
    cart: SharedCart,

    /// Products shown in the grid.
    catalog: StoredValue<Catalog>,

    /// Endpoint, landing page, and display currency.
    config: StoredValue<StorefrontConfig>,

    /// Bumped after every persisted cart change so views re-render.
    revision: RwSignal<u64>,

    /// Latest acknowledgment or error for the status line.
    action_message: RwSignal<Option<String>>,
}

impl Storefront {
    fn load() -> Result<Self, String> {
        let catalog =
            storefront_catalog().map_err(|error| format!("Failed to load catalog: {error}"))?;
        let config = location_config();

        let revision = RwSignal::new(0_u64);
        let action_message = RwSignal::new(None::<String>);

        let store = CartStore::with_key(BrowserStorage::new(), config.storage_key.clone());
        let service = CartService::new(store)
            .with_observer(BadgeUpdater::new(badges::dom_badges()))
            .with_observer(move |event: &CartEvent, _cart: &Cart| {
                revision.update(|revision| *revision = revision.saturating_add(1));

                if let Some(message) = event.acknowledgment() {
                    action_message.set(Some(message));
                }
            });

        Ok(Self {
            cart: StoredValue::new_local(Rc::new(service)),
            catalog: StoredValue::new(catalog),
            config: StoredValue::new(config),
            revision,
            action_message,
        })
    }

    /// Translate a control activation and apply it to the cart.
    fn apply(self, control: Control, id: &str, value: Option<&str>) {
        let action = CartAction::from_control(control, id, value);

        let result = self.cart.with_value(|service| {
            self.catalog
                .with_value(|catalog| service.dispatch(&action, catalog))
        });

        if let Err(error) = result {
            warn!("cart action failed: {error}");

            self.action_message.set(Some(error.to_string()));
        }
    }

    fn count(self) -> u64 {
        self.cart.with_value(|service| service.count())
    }
}

/// Settings for the page's own location, falling back to the development defaults.
fn location_config() -> StorefrontConfig {
    let Some(location) = web_sys::window().map(|window| window.location()) else {
        return StorefrontConfig::default();
    };

    match (location.origin(), location.hostname()) {
        (Ok(origin), Ok(hostname)) => StorefrontConfig::for_location(&origin, &hostname),
        _ => StorefrontConfig::default(),
    }
}

/// Main storefront shell.
#[component]
fn App() -> impl IntoView {
    match Storefront::load() {
        Ok(storefront) => {
            let initial_count = storefront.count();

            // Badges outside the mounted app
            BadgeUpdater::new(badges::dom_badges()).update(initial_count);

            view! {
                <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                    <header class="mx-auto mb-6 flex max-w-5xl items-center justify-between">
                        <h1 class="text-2xl font-semibold tracking-tight">"Premium Shop"</h1>
                        <span class="cart-badge">
                            "Cart "
                            <span id=HEADER_BADGE_ID>{initial_count.to_string()}</span>
                        </span>
                    </header>
                    <p class="mx-auto max-w-5xl text-sm text-emerald-700" role="status" aria-live="polite">
                        {move || storefront.action_message.get().unwrap_or_default()}
                    </p>
                    <div class="mx-auto grid max-w-5xl grid-cols-1 gap-6 md:grid-cols-3">
                        <catalog::CatalogGrid storefront=storefront />
                        <div class="flex flex-col gap-6">
                            <summary::OrderSummaryPanel storefront=storefront />
                            <checkout::CheckoutPanel storefront=storefront />
                        </div>
                    </div>
                </main>
            }
            .into_any()
        }
        Err(error_message) => view! {
            <main class="min-h-screen bg-slate-50 px-4 py-6 text-slate-900">
                <div class="mx-auto max-w-3xl rounded-lg border border-red-200 bg-red-50 p-4">
                    <p class="text-sm text-red-700">{error_message}</p>
                </div>
            </main>
        }
        .into_any(),
    }
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init(Level::DEBUG);

    leptos::mount::mount_to_body(App);
}

//! Subcommands

use std::io;

use clap::{Args, Subcommand};
use storefront::{
    actions::{CartAction, Control},
    cart::Cart,
    checkout::{Checkout, CheckoutForm, HttpOrderTransport},
    config::StorefrontConfig,
    fixtures::{FixtureError, load_catalog_file, storefront_catalog},
    observers::{BadgeSlot, BadgeUpdater, CartEvent},
    products::Catalog,
    receipt::{ReceiptError, write_summary},
    render::{badge_text, catalog_cards, order_summary},
    service::{CartError, CartService},
    store::CartStore,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::{config::CliConfig, storage::FileStorage};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List the products that can be added
    Catalog,

    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Units to add; blank, malformed, or non-positive input adds 1
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },

    /// Remove a line from the cart
    Remove {
        /// Line id
        id: String,
    },

    /// Replace a line's quantity
    SetQuantity {
        /// Line id
        id: String,

        /// New quantity; blank, malformed, or non-positive input sets 1
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Add one unit to a line
    Increment {
        /// Line id
        id: String,
    },

    /// Take one unit from a line, keeping at least one
    Decrement {
        /// Line id
        id: String,
    },

    /// Print the order summary
    Summary,

    /// Print the number of units in the cart
    Count,

    /// Empty the cart
    Clear,

    /// Submit the cart as an order
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer name
    #[arg(long)]
    name: String,

    /// Delivery address
    #[arg(long)]
    address: String,

    /// Contact email
    #[arg(long, default_value = "")]
    email: String,

    /// Contact phone
    #[arg(long, default_value = "")]
    phone: String,

    /// Delivery notes
    #[arg(long, default_value = "")]
    notes: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            notes: args.notes,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] FixtureError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("{0} is not in the cart")]
    NotInCart(String),

    #[error("{0}")]
    Checkout(String),
}

/// Badge slot that prints the count to the terminal.
#[derive(Debug, Clone, Copy)]
struct TerminalBadge;

impl BadgeSlot for TerminalBadge {
    #[expect(clippy::print_stdout, reason = "the terminal is this badge's display")]
    fn show_count(&self, count: u64) -> bool {
        println!("Cart: {count}");

        true
    }
}

#[expect(clippy::print_stdout, reason = "acknowledgments are shown on the terminal")]
fn print_acknowledgment(event: &CartEvent, _cart: &Cart) {
    if let Some(message) = event.acknowledgment() {
        println!("{message}");
    }
}

fn load_catalog(config: &CliConfig) -> Result<Catalog, FixtureError> {
    match &config.catalog {
        Some(path) => load_catalog_file(path),
        None => storefront_catalog(),
    }
}

pub(crate) async fn run(config: CliConfig) -> Result<(), CommandError> {
    let settings = config.storefront();
    let catalog = load_catalog(&config)?;

    let store = CartStore::with_key(
        FileStorage::new(&config.data_dir),
        settings.storage_key.clone(),
    );
    let service = CartService::new(store)
        .with_observer(BadgeUpdater::new([TerminalBadge]))
        .with_observer(print_acknowledgment);

    match config.command {
        Command::Catalog => {
            print_catalog(&catalog);

            Ok(())
        }
        Command::Add { id, quantity } => dispatch(
            &service,
            &catalog,
            Control::AddToCart,
            &id,
            Some(&quantity),
        ),
        Command::Remove { id } => dispatch(&service, &catalog, Control::RemoveItem, &id, None),
        Command::SetQuantity { id, quantity } => dispatch(
            &service,
            &catalog,
            Control::QuantityInput,
            &id,
            Some(&quantity),
        ),
        Command::Increment { id } => {
            dispatch(&service, &catalog, Control::IncrementItem, &id, None)
        }
        Command::Decrement { id } => {
            dispatch(&service, &catalog, Control::DecrementItem, &id, None)
        }
        Command::Summary => print_summary(&service, &settings),
        Command::Count => {
            print_count(&service);

            Ok(())
        }
        Command::Clear => {
            service.clear()?;

            Ok(())
        }
        Command::Checkout(args) => checkout(&service, &settings, args).await,
    }
}

fn dispatch(
    service: &CartService<FileStorage>,
    catalog: &Catalog,
    control: Control,
    id: &str,
    value: Option<&str>,
) -> Result<(), CommandError> {
    let action = CartAction::from_control(control, id, value);
    let cart = service.dispatch(&action, catalog)?;

    let targets_line = !matches!(control, Control::AddToCart | Control::RemoveItem);

    if targets_line && cart.get(id).is_none() {
        return Err(CommandError::NotInCart(id.to_string()));
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "command output")]
fn print_catalog(catalog: &Catalog) {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price"]);

    for card in catalog_cards(catalog) {
        builder.push_record([card.id, card.title, card.price]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    println!("{table}");
}

fn print_summary(
    service: &CartService<FileStorage>,
    settings: &StorefrontConfig,
) -> Result<(), CommandError> {
    let summary = order_summary(&service.cart(), settings.currency);

    write_summary(io::stdout().lock(), &summary)?;

    Ok(())
}

#[expect(clippy::print_stdout, reason = "command output")]
fn print_count(service: &CartService<FileStorage>) {
    println!("{}", badge_text(&service.cart()));
}

#[expect(clippy::print_stdout, reason = "command output")]
async fn checkout(
    service: &CartService<FileStorage>,
    settings: &StorefrontConfig,
    args: CheckoutArgs,
) -> Result<(), CommandError> {
    let transport = HttpOrderTransport::new(settings.checkout_endpoint.clone());
    let checkout = Checkout::new(service, &transport).with_landing_page(settings.landing_page.clone());

    info!(endpoint = transport.endpoint(), "checking out");

    let receipt = checkout
        .submit(&args.into())
        .await
        .map_err(|error| CommandError::Checkout(error.user_message()))?;

    println!("{}", receipt.user_message());
    println!("order_id: {}", receipt.order.id());

    if let Some(message) = &receipt.server_message {
        println!("server: {message}");
    }

    Ok(())
}

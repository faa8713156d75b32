//! Actions
//!
//! Maps user controls to cart actions. Views register one handler per control and translate the
//! control's kind, line id, and input value through [`CartAction::from_control`]; the resulting
//! action is applied by [`CartService::dispatch`](crate::service::CartService::dispatch).

/// A control the storefront views can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// "Add to cart" button on a catalog card. Its value is the card's quantity selector.
    AddToCart,

    /// "Remove" button on a summary line.
    RemoveItem,

    /// "+" button on a summary line.
    IncrementItem,

    /// "−" button on a summary line.
    DecrementItem,

    /// Quantity input on a summary line. Its value is the input's text.
    QuantityInput,
}

/// A cart mutation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add units of a catalog product.
    Add {
        /// Catalog product id
        product_id: String,

        /// Requested units; clamped to at least 1 when applied
        quantity: i64,
    },

    /// Remove a line.
    Remove {
        /// Line id
        id: String,
    },

    /// Step a line's quantity.
    Adjust {
        /// Line id
        id: String,

        /// Quantity change
        delta: i64,
    },

    /// Replace a line's quantity.
    SetQuantity {
        /// Line id
        id: String,

        /// Requested quantity; clamped to at least 1 when applied
        quantity: i64,
    },
}

impl CartAction {
    /// Translate a control activation into an action.
    ///
    /// `value` is the text of the input associated with the control, when it has one. Missing or
    /// unparseable input reads as a quantity of 1.
    #[must_use]
    pub fn from_control(control: Control, id: &str, value: Option<&str>) -> Self {
        let id = id.to_string();

        match control {
            Control::AddToCart => Self::Add {
                product_id: id,
                quantity: value.map_or(1, parse_quantity),
            },
            Control::RemoveItem => Self::Remove { id },
            Control::IncrementItem => Self::Adjust { id, delta: 1 },
            Control::DecrementItem => Self::Adjust { id, delta: -1 },
            Control::QuantityInput => Self::SetQuantity {
                id,
                quantity: value.map_or(1, parse_quantity),
            },
        }
    }
}

/// Parse quantity input text, reading blank or malformed input as 1 and clamping to at least 1.
///
/// Fractional input is truncated toward zero.
#[must_use]
pub fn parse_quantity(raw: &str) -> i64 {
    let raw = raw.trim();

    let parsed = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(truncate_quantity)
    });

    parsed.unwrap_or(1).max(1)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "quantity input is truncated toward zero and saturates at the i64 range"
)]
fn truncate_quantity(value: f64) -> i64 {
    value.trunc() as i64
}

/// Step a catalog card's quantity selector, never going below 1.
#[must_use]
pub fn step_selector(value: &str, delta: i64) -> i64 {
    parse_quantity(value).saturating_add(delta).max(1)
}

//! Receipt
//!
//! Terminal rendering of the order summary.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::render::OrderSummary;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Write the order summary as a table followed by the grand total.
///
/// # Errors
///
/// Returns a `ReceiptError` if the output cannot be written.
pub fn write_summary(mut out: impl io::Write, summary: &OrderSummary) -> Result<(), ReceiptError> {
    let (lines, total) = match summary {
        OrderSummary::Empty { message } => {
            writeln!(out, "{message}")?;

            return Ok(());
        }
        OrderSummary::Lines { lines, total } => (lines, total),
    };

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Each", "Qty", "Subtotal"]);

    for line in lines {
        builder.push_record([
            line.id.clone(),
            line.title.clone(),
            line.unit_price.clone(),
            line.quantity.to_string(),
            line.subtotal.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Total: {total}")?;

    Ok(())
}

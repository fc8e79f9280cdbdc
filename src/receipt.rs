//! Receipt
//!
//! Terminal tables for the cart and for a placed order.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::items::LineItem,
    checkout::Order,
    prices::Price,
    pricing::{self, TotalPriceError},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Output could not be written
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),

    /// Cart total could not be computed
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Write the cart as a numbered table followed by its total.
///
/// Row numbers are the indexes accepted by removal.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, items: &[LineItem]) -> Result<(), ReceiptError> {
    if items.is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    write_items_table(&mut out, items)?;

    let total = pricing::subtotal(items)?;

    write_summary(&mut out, &[("Total:", total.to_string())])
}

/// Write an order confirmation: the order details, its items, then the
/// subtotal, shipping and total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), ReceiptError> {
    writeln!(out, "\n Order {}", order.number())?;
    writeln!(out, " Placed  {} {}", order.date(), order.time())?;
    writeln!(out, " Payment {}", order.payment().label())?;
    writeln!(out, " Ship to {}", order.address())?;

    write_items_table(&mut out, order.items())?;

    let shipping = if order.shipping() == Price::ZERO {
        "Free".to_string()
    } else {
        order.shipping().to_string()
    };

    write_summary(
        &mut out,
        &[
            ("Subtotal:", order.subtotal().to_string()),
            ("Shipping:", shipping),
            ("Total:", order.total().to_string()),
        ],
    )
}

fn write_items_table(out: &mut impl io::Write, items: &[LineItem]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Price"]);

    for (idx, item) in items.iter().enumerate() {
        builder.push_record([idx.to_string(), item.name.clone(), item.price.to_string()]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::first(), Color::new("\x1b[90m", "\x1b[0m"));
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, lines: &[(&str, String)]) -> Result<(), ReceiptError> {
    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in lines {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}

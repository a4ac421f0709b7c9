//! Text views of storefront state.
//!
//! Every function returns the finished text so views can be tested without a
//! terminal. Writing to a `String` cannot fail, hence the ignored results.

use std::fmt::Write as _;

use riddim_core::Price;
use riddim_storefront::catalog::Product;
use riddim_storefront::checkout::{CheckoutError, OrderConfirmation};
use riddim_storefront::{AppError, CartTotals, LineItem};

/// Cart lines followed by the totals block.
pub fn cart(items: &[LineItem], totals: &CartTotals) -> String {
    if items.is_empty() {
        return "Your cart is empty\n".to_owned();
    }

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<28} {:>14} x {:<3} {:>16}",
            i + 1,
            item.name,
            Price::jmd(item.price).display(),
            item.quantity,
            line_total(item),
        );
    }
    out.push('\n');
    out.push_str(&self::totals(totals));
    out
}

/// Subtotal, tax and total lines.
pub fn totals(totals: &CartTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subtotal:  {}", Price::jmd(totals.subtotal));
    let _ = writeln!(out, "Tax (15%): {}", Price::jmd(totals.tax));
    let _ = writeln!(out, "Total:     {}", Price::jmd(totals.total));
    out
}

/// Product listing.
pub fn products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products found\n".to_owned();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:<28} {:>14}  [{}]\n    {}",
            product.name,
            product.display_price(),
            product.category,
            product.description,
        );
    }
    out
}

/// Order confirmation receipt.
pub fn receipt(confirmation: &OrderConfirmation) -> String {
    let mut out = String::from("Order confirmed! Thank you for your purchase.\n\n");
    let _ = writeln!(out, "Order:     {}", confirmation.order_id);
    let _ = writeln!(
        out,
        "Date:      {}",
        confirmation.confirmed_at.format("%Y-%m-%d %H:%M UTC")
    );
    for item in &confirmation.items {
        let _ = writeln!(
            out,
            "  {} ({})  {}",
            item.name,
            item.quantity,
            line_total(item)
        );
    }
    out.push('\n');
    out.push_str(&totals(&confirmation.totals));
    let _ = writeln!(out, "Paid:      {}", Price::jmd(confirmation.payment));
    let _ = writeln!(out, "Change:    {}", Price::jmd(confirmation.change));
    out
}

fn line_total(item: &LineItem) -> String {
    item.line_total()
        .map_or_else(|| "-".to_owned(), |total| Price::jmd(total).display())
}

/// Message shown to the shopper for an error they can fix.
pub fn user_error(error: &AppError) -> String {
    match error {
        AppError::Checkout(CheckoutError::EmptyCart) => "Your cart is empty!".to_owned(),
        AppError::Checkout(CheckoutError::InsufficientPayment { total, .. }) => {
            format!("Insufficient payment. Total amount is {}", Price::jmd(*total))
        }
        AppError::Form(errors) => errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

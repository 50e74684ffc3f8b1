//! Plain-text cart rendering.

use std::fmt::Write;

use rocket_shoes_core::Cart;
use rust_decimal::Decimal;

/// Format a price in reais.
fn format_price(amount: Decimal) -> String {
    format!("R$ {:.2}", amount.round_dp(2))
}

/// Render the cart as a table followed by the subtotal.
#[must_use]
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<48} {:>6} {:>12}", "ID", "PRODUCT", "QTY", "TOTAL");

    for item in cart.items() {
        let title = item.product.title().unwrap_or("(untitled)");
        let total = item
            .line_total()
            .map_or_else(|| "-".to_string(), format_price);
        let _ = writeln!(
            out,
            "{:>4}  {:<48} {:>6} {:>12}",
            item.id(),
            truncate(title, 48),
            item.amount,
            total
        );
    }

    let _ = writeln!(
        out,
        "\n{} item(s), subtotal {}",
        cart.total_quantity(),
        format_price(cart.subtotal())
    );
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

//! Amount coercion and the total-amount fallback chain.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

use crate::models::InvoiceItem;

/// Where the final total amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalSource {
    /// The model reported a positive total.
    Reported,
    /// Recovered by summing item subtotals.
    ItemSum,
    /// Neither the reported total nor the items held a positive value.
    Fallback,
}

/// Minimal positive sentinel for receipts where no amount survived.
///
/// The entity rejects non-positive totals, and a priceless receipt must
/// still validate. Consumers detect this case through the confidence label,
/// not the numeric value.
pub fn fallback_total() -> Decimal {
    Decimal::new(1, 2)
}

/// Resolve the invoice total: reported value, then item sum, then sentinel.
pub fn calculate_total(raw_total: Option<&Value>, items: &[InvoiceItem]) -> (Decimal, TotalSource) {
    if let Some(total) = positive_number(raw_total) {
        return (total, TotalSource::Reported);
    }

    let sum: Decimal = items.iter().map(|item| item.subtotal).sum();
    if sum > Decimal::ZERO {
        return (sum, TotalSource::ItemSum);
    }

    (fallback_total(), TotalSource::Fallback)
}

/// Coerce a raw value into a strictly positive decimal.
pub fn positive_number(raw: Option<&Value>) -> Option<Decimal> {
    decimal_number(raw).filter(|d| *d > Decimal::ZERO)
}

/// Coerce a raw value into a non-negative decimal.
pub fn non_negative_number(raw: Option<&Value>) -> Option<Decimal> {
    decimal_number(raw).filter(|d| *d >= Decimal::ZERO)
}

fn decimal_number(raw: Option<&Value>) -> Option<Decimal> {
    raw.and_then(Value::as_f64).and_then(Decimal::from_f64)
}

/// Format an amount in Argentine style with the currency code prefixed
/// (e.g. "ARS 1.234,56").
pub fn format_amount(currency: &str, amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((&s, "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{} {}{},{}", currency, sign, grouped, decimal_part)
}

//! Line-item normalization.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::InvoiceItem;

use super::amounts::{non_negative_number, positive_number};
use super::text::text_or;

/// Where the final item list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsSource {
    /// The model reported a usable item array.
    Reported,
    /// The list was fabricated to satisfy the at-least-one-item invariant.
    Synthesized,
}

/// Normalize the raw item array into canonical line items.
///
/// The entity requires at least one item, so this never returns an empty
/// list. Missing or non-array input synthesizes a single line carrying the
/// raw total (when positive) as both unit price and subtotal. Reported
/// items keep their description (or the default), clamp quantity to a
/// positive number and unit price to a non-negative one, and always
/// recompute `subtotal = quantity × unit_price`; a model-supplied subtotal
/// is discarded.
pub fn normalize_items(
    raw_items: Option<&Value>,
    default_description: &str,
    raw_total: Option<&Value>,
) -> (Vec<InvoiceItem>, ItemsSource) {
    let elements = match raw_items.and_then(Value::as_array) {
        Some(arr) if !arr.is_empty() => arr,
        _ => {
            return (
                vec![synthesized_item(default_description, raw_total)],
                ItemsSource::Synthesized,
            );
        }
    };

    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        let obj = element.as_object();
        let field = |key: &str| obj.and_then(|map| map.get(key));

        let description = text_or(field("description"), default_description);
        if description.is_empty() {
            continue;
        }

        let quantity = positive_number(field("quantity")).unwrap_or(Decimal::ONE);
        let unit_price = non_negative_number(field("unitPrice")).unwrap_or(Decimal::ZERO);

        items.push(InvoiceItem {
            description,
            quantity,
            unit_price,
            subtotal: quantity * unit_price,
        });
    }

    if items.is_empty() {
        return (
            vec![synthesized_item(default_description, None)],
            ItemsSource::Synthesized,
        );
    }

    (items, ItemsSource::Reported)
}

fn synthesized_item(description: &str, raw_total: Option<&Value>) -> InvoiceItem {
    let amount = positive_number(raw_total).unwrap_or(Decimal::ZERO);
    InvoiceItem {
        description: description.to_string(),
        quantity: Decimal::ONE,
        unit_price: amount,
        subtotal: amount,
    }
}

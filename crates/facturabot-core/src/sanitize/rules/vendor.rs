//! Vendor block normalization.

use serde_json::Value;

use crate::models::Vendor;

use super::cuit::normalize_tax_id;
use super::text::{optional_text, text_or};

/// Name recorded when the model could not read the vendor.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Normalize the raw vendor object into a canonical [`Vendor`].
///
/// Total over any raw shape: a missing or non-object vendor yields the
/// placeholder name and the tax-id sentinel.
pub fn normalize_vendor(raw: Option<&Value>) -> Vendor {
    let obj = raw.and_then(Value::as_object);
    let field = |key: &str| obj.and_then(|map| map.get(key));

    Vendor {
        name: text_or(field("name"), UNKNOWN_VENDOR),
        tax_id: normalize_tax_id(field("taxId")),
        cvu: optional_text(field("cvu")),
        address: optional_text(field("address")),
    }
}

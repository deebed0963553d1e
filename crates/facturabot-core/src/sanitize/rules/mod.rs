//! Field normalizers for untrusted extraction payloads.
//!
//! Every function here is total and pure: given a possibly-absent,
//! wrong-typed or adversarial raw value it returns a canonical value,
//! substituting a documented default instead of erroring. Hard validation
//! happens later, at invoice construction.

pub mod amounts;
pub mod banks;
pub mod cuit;
pub mod currency;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod text;
pub mod vendor;

pub use amounts::{calculate_total, fallback_total, format_amount, TotalSource};
pub use banks::BankDirectory;
pub use cuit::{is_cuit, normalize_tax_id, NO_FIGURA};
pub use currency::{normalize_currency, DEFAULT_CURRENCY};
pub use dates::{display_date, normalize_date, parse_date};
pub use items::{normalize_items, ItemsSource};
pub use text::{normalize_text, optional_text, text_or};
pub use vendor::{normalize_vendor, UNKNOWN_VENDOR};

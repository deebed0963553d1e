//! Common regex patterns for Argentine invoice sanitization.

use lazy_static::lazy_static;

use regex::Regex;

lazy_static! {
    // CUIT (Argentine tax ID): XX-XXXXXXXX-X, dashes optional
    pub static ref CUIT_PATTERN: Regex = Regex::new(
        r"^\d{2}-?\d{8}-?\d{1}$"
    ).unwrap();

    // ISO date as produced by the normalizer
    pub static ref DATE_ISO: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();

    // DD/MM/YYYY, the format Argentine invoices print
    pub static ref DATE_DMY_SLASH: Regex = Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{4})$"
    ).unwrap();

    // YYYY/MM/DD, occasionally produced by the model
    pub static ref DATE_YMD_SLASH: Regex = Regex::new(
        r"^(\d{4})/(\d{1,2})/(\d{1,2})$"
    ).unwrap();
}

//! Confidence scoring over sanitized fields.

use crate::models::Confidence;

/// Which fields carried real data through normalization.
///
/// Required fields count only when genuine: a date that fell back to
/// today, a sentinel total, a synthesized item list or a placeholder
/// vendor scores nothing. The sanitizer fills this in while it still
/// knows which branch produced each value, because the normalized values
/// alone no longer show it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSurvey {
    pub has_invoice_number: bool,
    pub has_date: bool,
    pub has_vendor: bool,
    pub has_total: bool,
    pub has_items: bool,
    pub has_operation_type: bool,
    pub has_receiver_bank: bool,
    pub has_taxes: bool,
    pub has_payment_method: bool,
}

impl FieldSurvey {
    /// Two points per genuine required field, one per present optional.
    pub fn points(&self) -> u32 {
        let required = [
            self.has_invoice_number,
            self.has_date,
            self.has_vendor,
            self.has_total,
            self.has_items,
        ];
        let optional = [
            self.has_operation_type,
            self.has_receiver_bank,
            self.has_taxes,
            self.has_payment_method,
        ];

        let required: u32 = required.iter().map(|&b| b as u32 * 2).sum();
        let optional: u32 = optional.iter().map(|&b| b as u32).sum();
        required + optional
    }

    /// Deterministic label: 10 points or more is high, 6 or more medium.
    pub fn score(&self) -> Confidence {
        match self.points() {
            p if p >= 10 => Confidence::High,
            p if p >= 6 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

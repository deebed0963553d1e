//! Spreadsheet row model for session exports.
//!
//! The bot's export command turns a session's invoices into a sheet. This
//! module owns the row shape and the per-currency totals; rendering (CSV
//! here, a styled workbook in the bot front end) consumes this model
//! through the same accessors either way.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::Invoice;

/// Column headers, in sheet order.
pub const HEADERS: [&str; 10] = [
    "Fecha",
    "Número",
    "Tipo de operación",
    "Proveedor",
    "CUIT",
    "Banco receptor",
    "Medio de pago",
    "Moneda",
    "Total",
    "Confianza",
];

/// One sheet row per invoice. Display strings except for the amount,
/// which stays numeric so renderers can format or sum it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: String,
    pub invoice_number: String,
    pub operation_type: String,
    pub vendor_name: String,
    pub vendor_tax_id: String,
    pub receiver_bank: String,
    pub payment_method: String,
    pub currency: String,
    pub total_amount: Decimal,
    pub confidence: String,
}

impl From<&Invoice> for ExportRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            date: invoice.formatted_date(),
            invoice_number: invoice.invoice_number().to_string(),
            operation_type: invoice.operation_type().unwrap_or_default().to_string(),
            vendor_name: invoice.vendor().name.clone(),
            vendor_tax_id: invoice.vendor().tax_id.clone(),
            receiver_bank: invoice.receiver_bank().to_string(),
            payment_method: invoice.payment_method().unwrap_or_default().to_string(),
            currency: invoice.currency().to_string(),
            total_amount: invoice.total_amount(),
            confidence: invoice.metadata().confidence.as_str().to_string(),
        }
    }
}

impl ExportRow {
    /// Cells in header order, for plain-text renderers.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.invoice_number.clone(),
            self.operation_type.clone(),
            self.vendor_name.clone(),
            self.vendor_tax_id.clone(),
            self.receiver_bank.clone(),
            self.payment_method.clone(),
            self.currency.clone(),
            self.total_amount.to_string(),
            self.confidence.clone(),
        ]
    }
}

/// The flattened session, ready for a renderer.
#[derive(Debug, Clone, Default)]
pub struct ExportSheet {
    pub rows: Vec<ExportRow>,

    /// Footer totals, one per currency seen in the session.
    pub totals_by_currency: BTreeMap<String, Decimal>,
}

/// Flatten invoices into the sheet model.
pub fn build_sheet(invoices: &[Invoice]) -> ExportSheet {
    let mut sheet = ExportSheet::default();

    for invoice in invoices {
        sheet.rows.push(ExportRow::from(invoice));
        *sheet
            .totals_by_currency
            .entry(invoice.currency().to_string())
            .or_insert(Decimal::ZERO) += invoice.total_amount();
    }

    sheet
}

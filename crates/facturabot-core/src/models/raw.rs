//! Raw, untrusted extraction payload.

use serde::Deserialize;
use serde_json::Value;

/// The vision model's reply, decoded without trusting any field.
///
/// Every slot is an optional raw [`Value`]: the model may omit a field,
/// give it the wrong type, or echo adversarial document text into it.
/// Unknown fields are ignored. Shaping this into usable data is entirely
/// the sanitizer's job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExtraction {
    pub invoice_number: Option<Value>,
    pub date: Option<Value>,
    pub operation_type: Option<Value>,
    pub vendor: Option<Value>,
    pub total_amount: Option<Value>,
    pub currency: Option<Value>,
    pub receiver_bank: Option<Value>,
    pub items: Option<Value>,
    pub taxes: Option<Value>,
    pub payment_method: Option<Value>,
}

impl RawExtraction {
    /// Decode an arbitrary JSON value.
    ///
    /// A non-object value yields the empty payload; normalization then
    /// fills in every default downstream.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

//! Per-user invoice sessions with TTL-based expiry.
//!
//! The bot accumulates a user's extracted invoices between commands (for
//! batch export, summaries) and forgets them after a quiet period. State is
//! process-memory only; restarting the bot clears every session.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::Invoice;

#[derive(Debug)]
struct UserSession {
    invoices: Vec<Invoice>,
    last_activity: Instant,
}

/// Thread-safe, in-memory store of per-user invoice lists.
///
/// Per-user lists are append-only until cleared. Sessions expire `ttl`
/// after the last write; expired sessions linger until the owner calls
/// [`SessionStore::clean_expired`], which the bot runs on a timer.
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, UserSession>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given session lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a store with a lifetime given in minutes.
    pub fn with_ttl_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes * 60))
    }

    /// Append an invoice to the user's session, refreshing its lifetime.
    pub fn add_invoice(&self, user_id: i64, invoice: Invoice) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let session = sessions.entry(user_id).or_insert_with(|| UserSession {
            invoices: Vec::new(),
            last_activity: Instant::now(),
        });
        session.invoices.push(invoice);
        session.last_activity = Instant::now();
    }

    /// The user's invoices, cloned. Empty when no session exists.
    pub fn invoices(&self, user_id: i64) -> Vec<Invoice> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        sessions
            .get(&user_id)
            .map(|session| session.invoices.clone())
            .unwrap_or_default()
    }

    /// Drop the user's session, returning how many invoices it held.
    pub fn clear(&self, user_id: i64) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        sessions
            .remove(&user_id)
            .map(|session| session.invoices.len())
            .unwrap_or(0)
    }

    /// Drop every session older than the TTL, returning how many went.
    pub fn clean_expired(&self) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity.elapsed() < self.ttl);
        let removed = before - sessions.len();

        if removed > 0 {
            debug!("Expired {} idle session(s)", removed);
        }
        removed
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl_minutes(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invoice, RawExtraction};
    use crate::sanitize::{InvoiceSanitizer, SanitizeContext};
    use serde_json::json;

    fn sample_invoice(number: &str) -> Invoice {
        let raw = RawExtraction::from_value(json!({
            "invoiceNumber": number,
            "date": "2025-11-03",
            "vendor": { "name": "ACME" },
            "totalAmount": 100,
            "items": [{ "description": "x", "quantity": 1, "unitPrice": 100 }]
        }));
        let draft = InvoiceSanitizer::new().sanitize(&raw, &SanitizeContext::default());
        Invoice::new(draft).unwrap()
    }

    #[test]
    fn test_append_and_read_back() {
        let store = SessionStore::default();
        store.add_invoice(1, sample_invoice("A-1"));
        store.add_invoice(1, sample_invoice("A-2"));

        let invoices = store.invoices(1);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[0].invoice_number(), "A-1");
        assert_eq!(invoices[1].invoice_number(), "A-2");
    }

    #[test]
    fn test_users_are_isolated() {
        let store = SessionStore::default();
        store.add_invoice(1, sample_invoice("A-1"));
        store.add_invoice(2, sample_invoice("B-1"));

        assert_eq!(store.invoices(1).len(), 1);
        assert_eq!(store.invoices(2).len(), 1);
        assert_eq!(store.invoices(1)[0].invoice_number(), "A-1");
        assert!(store.invoices(3).is_empty());
    }

    #[test]
    fn test_clear_reports_count() {
        let store = SessionStore::default();
        store.add_invoice(1, sample_invoice("A-1"));
        store.add_invoice(1, sample_invoice("A-2"));

        assert_eq!(store.clear(1), 2);
        assert!(store.invoices(1).is_empty());
        assert_eq!(store.clear(1), 0);
    }

    #[test]
    fn test_clean_expired_sweeps_idle_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        store.add_invoice(1, sample_invoice("A-1"));
        store.add_invoice(2, sample_invoice("B-1"));
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(store.session_count(), 2);
        assert_eq!(store.clean_expired(), 2);
        assert_eq!(store.session_count(), 0);
        assert!(store.invoices(1).is_empty());
    }

    #[test]
    fn test_live_sessions_survive_sweep() {
        let store = SessionStore::with_ttl_minutes(30);
        store.add_invoice(1, sample_invoice("A-1"));

        assert_eq!(store.clean_expired(), 0);
        assert_eq!(store.invoices(1).len(), 1);
    }
}

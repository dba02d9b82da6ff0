//! Data model for the grocery document.
//!
//! All state lives in a single [`Document`] aggregate that is persisted
//! in full after every mutation. Item names are stored normalized
//! (trimmed, lower-cased); see [`normalize_item`].

mod document;
mod preferences;
mod purchase;

pub use document::{Document, LastPurchaseEntry, LastPurchases};
pub use preferences::{Diet, Preferences};
pub use purchase::{Expiry, ExpirySource, PurchaseRecord, NON_PERISHABLE};

/// Normalize an item name for storage and lookup: trim whitespace and
/// lower-case. Every engine operation applies this before touching state.
pub fn normalize_item(name: &str) -> String {
    name.trim().to_lowercase()
}

//! Pantry Core Library
//!
//! Grocery list state engine: typed document model, static rule tables,
//! restock prediction from learned purchase cadence, expiry alerts, and
//! optional oracle-backed advisory suggestions.

pub mod engine;
pub mod models;
pub mod oracle;
pub mod rules;
pub mod store;

pub use engine::{
    AddOutcome, AlertKind, EngineError, ExpiryAlert, GroceryEngine, PurchaseOutcome,
    RestockReason, RestockSuggestion, ORACLE_FALLBACK, RESTOCK_FACTOR,
};
pub use models::{
    normalize_item, Diet, Document, Expiry, ExpirySource, LastPurchases, Preferences,
    PurchaseRecord, NON_PERISHABLE,
};
pub use oracle::{HttpOracle, Oracle, OracleConfig, OracleError};
pub use store::{JsonStore, LoadOutcome, LoadSource, StoreError, DEFAULT_STORE_FILE};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

//! The persisted document aggregate.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::preferences::Preferences;
use super::purchase::PurchaseRecord;

/// One entry in the last-purchase map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPurchaseEntry {
    pub item: String,
    pub date: NaiveDate,
}

/// Insertion-ordered map from item name to the date of its most recent
/// purchase.
///
/// Restock predictions iterate this map in insertion order, which is part
/// of their contract, so it is backed by a `Vec` rather than a hash map
/// (JSON object key order is not something `serde_json` guarantees).
/// Serializes as an array of `{item, date}` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastPurchases(Vec<LastPurchaseEntry>);

impl LastPurchases {
    /// Date of the most recent purchase of `item`, if any.
    pub fn get(&self, item: &str) -> Option<NaiveDate> {
        self.0.iter().find(|e| e.item == item).map(|e| e.date)
    }

    /// Record `date` as the most recent purchase of `item`. A first
    /// purchase appends; later purchases update in place, preserving the
    /// item's position.
    pub fn set(&mut self, item: &str, date: NaiveDate) {
        match self.0.iter_mut().find(|e| e.item == item) {
            Some(entry) => entry.date = date,
            None => self.0.push(LastPurchaseEntry {
                item: item.to_string(),
                date,
            }),
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LastPurchaseEntry> {
        self.0.iter()
    }
}

/// The single persisted aggregate.
///
/// Created empty or loaded from the store at engine construction, mutated
/// only through engine operations, and written back in full after every
/// mutation. All fields default so documents written by older versions
/// load with sensible empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Items the user intends to buy. Normalized, no duplicates.
    pub want_list: Vec<String>,
    /// Append-only except for explicit removal.
    pub purchase_history: Vec<PurchaseRecord>,
    /// Most recent purchase date per item, in first-purchase order.
    pub last_purchase: LastPurchases,
    /// Day gaps between consecutive purchases per item; only gaps of two
    /// or more days are recorded.
    pub purchase_intervals: HashMap<String, Vec<i64>>,
    /// Oracle-derived shelf-life estimates, cached per item.
    pub learned_shelf_life: HashMap<String, i64>,
    /// Advisory-only user preferences.
    pub preferences: Preferences,
}

impl Document {
    /// True if `item` (already normalized) is on the want list,
    /// comparing case-insensitively against stored entries to tolerate
    /// casing drift in old documents.
    pub fn wants(&self, item: &str) -> bool {
        self.want_list.iter().any(|w| w.to_lowercase() == item)
    }

    /// Position of `item` on the want list (case-insensitive).
    pub fn want_position(&self, item: &str) -> Option<usize> {
        self.want_list.iter().position(|w| w.to_lowercase() == item)
    }

    /// Remove `item` from the want list (case-insensitive). Returns true
    /// if an entry was removed. Never touches the purchase history.
    pub fn remove_want(&mut self, item: &str) -> bool {
        let before = self.want_list.len();
        self.want_list.retain(|w| w.to_lowercase() != item);
        self.want_list.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase::{Expiry, ExpirySource};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_purchases_insertion_order() {
        let mut map = LastPurchases::default();
        map.set("milk", date(2026, 8, 1));
        map.set("bread", date(2026, 8, 2));
        map.set("milk", date(2026, 8, 10)); // update keeps position

        let items: Vec<&str> = map.iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["milk", "bread"]);
        assert_eq!(map.get("milk"), Some(date(2026, 8, 10)));
        assert_eq!(map.get("cheese"), None);
    }

    #[test]
    fn test_want_list_case_insensitive() {
        let mut doc = Document {
            want_list: vec!["Milk".to_string(), "bread".to_string()],
            ..Document::default()
        };

        assert!(doc.wants("milk"));
        assert_eq!(doc.want_position("milk"), Some(0));
        assert!(doc.remove_want("milk"));
        assert!(!doc.wants("milk"));
        assert_eq!(doc.want_list, vec!["bread".to_string()]);
    }

    #[test]
    fn test_remove_want_keeps_history() {
        let mut doc = Document::default();
        doc.want_list.push("milk".to_string());
        doc.purchase_history.push(PurchaseRecord::new(
            "milk",
            1,
            date(2026, 8, 1),
            Expiry::Date(date(2026, 8, 8)),
            ExpirySource::Default,
        ));

        doc.remove_want("milk");
        assert_eq!(doc.purchase_history.len(), 1);
    }

    #[test]
    fn test_document_forward_compatible_load() {
        // A document written before learned shelf life and preferences
        // existed still loads, with empty defaults.
        let json = r#"{
            "want_list": ["milk"],
            "purchase_history": [],
            "last_purchase": []
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.want_list, vec!["milk".to_string()]);
        assert!(doc.learned_shelf_life.is_empty());
        assert!(doc.purchase_intervals.is_empty());
        assert_eq!(doc.preferences, Preferences::default());
    }

    #[test]
    fn test_document_json_roundtrip() {
        let mut doc = Document::default();
        doc.want_list.push("bread".to_string());
        doc.last_purchase.set("milk", date(2026, 8, 10));
        doc.purchase_intervals
            .insert("milk".to_string(), vec![6, 8]);
        doc.learned_shelf_life.insert("kimchi".to_string(), 21);
        doc.purchase_history.push(PurchaseRecord::new(
            "milk",
            1,
            date(2026, 8, 10),
            Expiry::Date(date(2026, 8, 17)),
            ExpirySource::Default,
        ));

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}

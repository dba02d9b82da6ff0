//! Purchase records and expiry dates.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Sentinel string used in the persisted document for items that do not
/// expire (the oracle judged them non-perishable).
pub const NON_PERISHABLE: &str = "non-perishable";

/// Expiry of a purchased item: a concrete date or the non-perishable
/// sentinel. Serializes as `YYYY-MM-DD` or `"non-perishable"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Date(NaiveDate),
    NonPerishable,
}

impl Expiry {
    /// Days until expiry relative to `today` (negative when already
    /// expired). `None` for non-perishable items.
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        match self {
            Expiry::Date(date) => Some((*date - today).num_days()),
            Expiry::NonPerishable => None,
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Expiry::NonPerishable => write!(f, "{}", NON_PERISHABLE),
        }
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == NON_PERISHABLE {
            return Ok(Expiry::NonPerishable);
        }
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Expiry::Date)
            .map_err(|e| serde::de::Error::custom(format!("invalid expiry date '{}': {}", s, e)))
    }
}

/// Where a record's shelf-life estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirySource {
    /// Static shelf-life rule table (or the 7-day fallback).
    Default,
    /// Learned from this household: purchase-interval average or a
    /// previously cached oracle estimate.
    Learned,
    /// Fresh oracle estimate obtained during this purchase.
    Oracle,
}

impl fmt::Display for ExpirySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpirySource::Default => write!(f, "default rule"),
            ExpirySource::Learned => write!(f, "learned"),
            ExpirySource::Oracle => write!(f, "oracle"),
        }
    }
}

/// One purchase of one item.
///
/// The `id` is a stable removal token: unlike the record's position in
/// `purchase_history`, it survives removals of other records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Stable identifier. Generated on creation; documents written by
    /// older versions get a fresh id on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Normalized item name
    pub item: String,
    /// Units purchased (at least 1)
    pub quantity: u32,
    /// Date of purchase
    pub purchase_date: NaiveDate,
    /// Computed expiry
    pub expiry: Expiry,
    /// How the shelf life was determined
    pub expiry_source: ExpirySource,
}

impl PurchaseRecord {
    /// Create a record with a fresh id.
    pub fn new(
        item: impl Into<String>,
        quantity: u32,
        purchase_date: NaiveDate,
        expiry: Expiry,
        expiry_source: ExpirySource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            quantity,
            purchase_date,
            expiry,
            expiry_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expiry_days_left() {
        let today = date(2026, 8, 23);
        assert_eq!(Expiry::Date(date(2026, 8, 25)).days_left(today), Some(2));
        assert_eq!(Expiry::Date(date(2026, 8, 22)).days_left(today), Some(-1));
        assert_eq!(Expiry::NonPerishable.days_left(today), None);
    }

    #[test]
    fn test_expiry_serialization() {
        let expiry = Expiry::Date(date(2026, 8, 30));
        assert_eq!(serde_json::to_string(&expiry).unwrap(), "\"2026-08-30\"");

        let sentinel = Expiry::NonPerishable;
        assert_eq!(
            serde_json::to_string(&sentinel).unwrap(),
            "\"non-perishable\""
        );
    }

    #[test]
    fn test_expiry_deserialization() {
        let expiry: Expiry = serde_json::from_str("\"2026-08-30\"").unwrap();
        assert_eq!(expiry, Expiry::Date(date(2026, 8, 30)));

        let sentinel: Expiry = serde_json::from_str("\"non-perishable\"").unwrap();
        assert_eq!(sentinel, Expiry::NonPerishable);

        let malformed: Result<Expiry, _> = serde_json::from_str("\"soonish\"");
        assert!(malformed.is_err());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = PurchaseRecord::new(
            "milk",
            2,
            date(2026, 8, 23),
            Expiry::Date(date(2026, 8, 30)),
            ExpirySource::Default,
        );

        let json = serde_json::to_string(&record).unwrap();
        let parsed: PurchaseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_without_id_gets_one() {
        // Documents written before stable ids existed have no id field.
        let json = r#"{
            "item": "milk",
            "quantity": 1,
            "purchase_date": "2026-08-23",
            "expiry": "2026-08-30",
            "expiry_source": "default"
        }"#;
        let record: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.item, "milk");
        assert!(!record.id.is_nil());
    }
}

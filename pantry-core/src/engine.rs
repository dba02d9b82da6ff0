//! The grocery state engine.
//!
//! A [`GroceryEngine`] is a request-scoped handle: the caller constructs
//! one from a store (and an optional oracle), invokes operations on it,
//! and drops it. Every mutating operation persists the full document
//! before returning. Oracle queries only ever shape the returned
//! messages; a failed or slow oracle never blocks or corrupts a
//! mutation.

use std::fmt;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    normalize_item, Diet, Document, Expiry, ExpirySource, Preferences, PurchaseRecord,
};
use crate::oracle::{parse_first_integer, Oracle};
use crate::rules;
use crate::store::{JsonStore, StoreError};

/// Restock is suggested slightly before the expected interval elapses.
pub const RESTOCK_FACTOR: f64 = 0.9;

/// Items expiring within this many days raise a critical alert.
const CRITICAL_WINDOW_DAYS: i64 = 2;

/// Day gaps below this are same-day or duplicate-entry noise and are not
/// recorded as a cadence signal.
const MIN_CADENCE_GAP_DAYS: i64 = 2;

/// Fixed text substituted when a configured oracle fails.
pub const ORACLE_FALLBACK: &str = "Advisory suggestions are unavailable right now.";

/// Errors surfaced to the caller. Validation failures are expected,
/// renderable outcomes; only `Store` is a genuine fault.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Item name cannot be empty")]
    EmptyInput,

    #[error("'{0}' is already on the list")]
    DuplicateItem(String),

    #[error("'{0}' is not on the list")]
    ItemNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of adding an item to the want list.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// Normalized item name that was added
    pub item: String,
    /// Healthier substitute, when a rule matched
    pub healthier_alternative: Option<&'static str>,
    /// Commonly co-purchased items, when a rule matched
    pub pairings: Option<&'static [&'static str]>,
    /// Dietary warning from the oracle, when the user has a dietary
    /// restriction and the oracle flagged the item
    pub dietary_warning: Option<String>,
    /// Oracle annotation (or the fixed fallback when the oracle failed);
    /// `None` when no oracle is configured
    pub advisory: Option<String>,
}

impl AddOutcome {
    /// True iff a healthier-alternative rule matched.
    pub fn has_health_warning(&self) -> bool {
        self.healthier_alternative.is_some()
    }

    /// Renderable multi-line confirmation.
    pub fn message(&self) -> String {
        let mut lines = vec![format!("Added '{}' to your list.", self.item)];
        if let Some(alt) = self.healthier_alternative {
            lines.push(format!("Health tip: consider {} instead.", alt));
        }
        if let Some(pairs) = self.pairings {
            lines.push(format!("Pairs well with: {}", pairs.join(", ")));
        }
        if let Some(warning) = &self.dietary_warning {
            lines.push(format!("Dietary warning: {}", warning));
        }
        if let Some(advisory) = &self.advisory {
            lines.push(advisory.clone());
        }
        lines.join("\n")
    }
}

/// Result of recording a purchase.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    /// The record that was appended to the history
    pub record: PurchaseRecord,
}

impl PurchaseOutcome {
    /// Renderable confirmation including the computed expiry.
    pub fn message(&self) -> String {
        match self.record.expiry {
            Expiry::Date(_) => format!(
                "Purchased {}x {} (expires {}, {})",
                self.record.quantity, self.record.item, self.record.expiry,
                self.record.expiry_source
            ),
            Expiry::NonPerishable => format!(
                "Purchased {}x {} (non-perishable, {})",
                self.record.quantity, self.record.item, self.record.expiry_source
            ),
        }
    }
}

/// Why an item was suggested for restock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RestockReason {
    /// Expected interval derived from this household's recorded
    /// purchase cadence.
    LearnedAverage { expected_days: f64 },
    /// Expected interval taken from the static shelf-life table.
    DefaultRule { expected_days: i64 },
}

impl fmt::Display for RestockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestockReason::LearnedAverage { expected_days } => {
                write!(f, "you usually rebuy every {:.1} days", expected_days)
            }
            RestockReason::DefaultRule { expected_days } => {
                write!(f, "typical shelf life is {} days", expected_days)
            }
        }
    }
}

/// A restock suggestion for an item that is likely running low.
#[derive(Debug, Clone, Serialize)]
pub struct RestockSuggestion {
    pub item: String,
    pub days_since_last_purchase: i64,
    pub reason: RestockReason,
}

impl RestockSuggestion {
    pub fn message(&self) -> String {
        format!(
            "{}: bought {} days ago ({})",
            self.item, self.days_since_last_purchase, self.reason
        )
    }
}

/// Severity of an expiry alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Expired,
    Critical,
}

/// An expiry alert for one purchase record.
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryAlert {
    pub kind: AlertKind,
    /// Item name, so a critical alert can offer one-click re-adding
    pub item: String,
    /// Stable removal token for the record
    pub record_id: Uuid,
    /// Position in the history at evaluation time. Invalidated by any
    /// structural mutation of the history; prefer `record_id`.
    pub record_index: usize,
    /// Negative when already expired
    pub days_left: i64,
}

impl ExpiryAlert {
    pub fn message(&self) -> String {
        match self.kind {
            AlertKind::Expired => {
                format!("{} expired {} days ago!", self.item, -self.days_left)
            }
            AlertKind::Critical => format!(
                "{} expires in {} days. Plan to use or restock.",
                self.item, self.days_left
            ),
        }
    }
}

/// The grocery state engine.
///
/// Owns the loaded [`Document`], the store it persists to, and an
/// optional oracle for advisory text.
pub struct GroceryEngine {
    store: JsonStore,
    oracle: Option<Box<dyn Oracle>>,
    document: Document,
}

impl GroceryEngine {
    /// Load the document from the store and construct an engine.
    ///
    /// A missing or malformed store file yields the empty default
    /// document (the store logs the malformed case).
    pub fn open(store: JsonStore, oracle: Option<Box<dyn Oracle>>) -> Result<Self, StoreError> {
        let outcome = store.load()?;
        Ok(Self {
            store,
            oracle,
            document: outcome.document,
        })
    }

    /// Read access to the current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.document)
    }

    /// Ask the oracle, absorbing any failure into `None`.
    fn ask_oracle(&self, prompt: &str) -> Option<String> {
        let oracle = self.oracle.as_deref()?;
        match oracle.complete(prompt) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Oracle query failed: {}", e);
                None
            }
        }
    }

    fn ask_oracle_or_fallback(&self, prompt: &str) -> String {
        self.ask_oracle(prompt)
            .unwrap_or_else(|| ORACLE_FALLBACK.to_string())
    }

    /// Add an item to the want list.
    ///
    /// Returns `EmptyInput` for blank names and `DuplicateItem` when the
    /// item is already listed (case- and whitespace-insensitive); the
    /// duplicate case is a warning for the caller to render, not a
    /// fault. On success the item is appended and persisted before any
    /// oracle query runs.
    pub fn add_item(&mut self, name: &str) -> Result<AddOutcome, EngineError> {
        let item = normalize_item(name);
        if item.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        if self.document.wants(&item) {
            return Err(EngineError::DuplicateItem(item));
        }

        self.document.want_list.push(item.clone());
        self.persist()?;
        tracing::debug!(item = %item, "Added to want list");

        let (dietary_warning, advisory) = if self.oracle.is_some() {
            let warning = self.dietary_check(&item).filter(|reply| {
                // The oracle is asked to answer YES or NO
                reply.to_uppercase().contains("NO")
            });
            let advisory = self.ask_oracle_or_fallback(&format!(
                "Should I add {} to a grocery list that already has: {}? \
                 Answer in one short sentence.",
                item,
                self.document.want_list.join(", ")
            ));
            (warning, Some(advisory))
        } else {
            (None, None)
        };

        Ok(AddOutcome {
            healthier_alternative: rules::healthier_alternative(&item),
            pairings: rules::pairings(&item),
            dietary_warning,
            advisory,
            item,
        })
    }

    /// Record a purchase of `name` made today.
    pub fn record_purchase(
        &mut self,
        name: &str,
        quantity: u32,
    ) -> Result<PurchaseOutcome, EngineError> {
        self.record_purchase_on(name, quantity, today())
    }

    /// Record a purchase made on an explicit date.
    pub fn record_purchase_on(
        &mut self,
        name: &str,
        quantity: u32,
        today: NaiveDate,
    ) -> Result<PurchaseOutcome, EngineError> {
        let item = normalize_item(name);
        if item.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let quantity = quantity.max(1);

        let (expiry, expiry_source) = self.resolve_expiry(&item, today);

        // Learn purchase cadence from the gap since the previous
        // purchase; gaps of a day or less are duplicate-entry noise.
        if let Some(prior) = self.document.last_purchase.get(&item) {
            let gap = (today - prior).num_days();
            if gap >= MIN_CADENCE_GAP_DAYS {
                self.document
                    .purchase_intervals
                    .entry(item.clone())
                    .or_default()
                    .push(gap);
            }
        }
        self.document.last_purchase.set(&item, today);

        let record = PurchaseRecord::new(&item, quantity, today, expiry, expiry_source);
        self.document.purchase_history.push(record.clone());

        // Purchasing satisfies the want regardless of casing drift.
        self.document.remove_want(&item);

        self.persist()?;
        tracing::debug!(item = %item, quantity, %expiry, "Recorded purchase");

        Ok(PurchaseOutcome { record })
    }

    /// Resolve shelf life for a purchase, in preference order: recorded
    /// purchase-interval average, cached oracle estimate, static rule
    /// table, fresh oracle estimate, 7-day fallback.
    fn resolve_expiry(&mut self, item: &str, today: NaiveDate) -> (Expiry, ExpirySource) {
        if let Some(intervals) = self.document.purchase_intervals.get(item) {
            if !intervals.is_empty() {
                let days = interval_mean(intervals).round() as i64;
                return (expiry_from_days(today, days), ExpirySource::Learned);
            }
        }

        if let Some(&days) = self.document.learned_shelf_life.get(item) {
            return (expiry_from_days(today, days), ExpirySource::Learned);
        }

        if let Some(days) = rules::shelf_life_days(item) {
            return (expiry_from_days(today, days), ExpirySource::Default);
        }

        // Previously unseen item: ask the oracle once and cache positive
        // estimates. Zero or negative means non-perishable.
        if self.oracle.is_some() {
            let prompt = format!(
                "Is '{}' perishable food? If not (non-food, electronics, \
                 nonsense), return -1. If it is, return its average fridge \
                 shelf life in days. Return only the integer.",
                item
            );
            if let Some(reply) = self.ask_oracle(&prompt) {
                match parse_first_integer(&reply) {
                    Some(days) if days > 0 => {
                        self.document
                            .learned_shelf_life
                            .insert(item.to_string(), days);
                        return (expiry_from_days(today, days), ExpirySource::Oracle);
                    }
                    Some(_) => return (Expiry::NonPerishable, ExpirySource::Oracle),
                    None => {
                        tracing::warn!(item = %item, reply = %reply, "Unparseable shelf-life reply");
                    }
                }
            }
        }

        (
            expiry_from_days(today, rules::DEFAULT_SHELF_LIFE_DAYS),
            ExpirySource::Default,
        )
    }

    /// Suggest items that are likely running low, as of today.
    pub fn predict_restock(&self) -> Vec<RestockSuggestion> {
        self.predict_restock_on(today())
    }

    /// Restock suggestions as of an explicit date.
    ///
    /// Considers every item with a recorded last purchase that is not
    /// currently on the want list. Output order is the insertion order
    /// of the last-purchase map.
    pub fn predict_restock_on(&self, today: NaiveDate) -> Vec<RestockSuggestion> {
        let mut suggestions = Vec::new();

        for entry in self.document.last_purchase.iter() {
            if self.document.wants(&entry.item) {
                continue;
            }
            let days_passed = (today - entry.date).num_days();

            let (expected, reason) = match self
                .document
                .purchase_intervals
                .get(&entry.item)
                .filter(|intervals| !intervals.is_empty())
            {
                Some(intervals) => {
                    let mean = interval_mean(intervals);
                    (
                        mean,
                        RestockReason::LearnedAverage {
                            expected_days: mean,
                        },
                    )
                }
                None => {
                    let days = rules::shelf_life_or_default(&entry.item);
                    (
                        days as f64,
                        RestockReason::DefaultRule {
                            expected_days: days,
                        },
                    )
                }
            };

            if days_passed as f64 >= RESTOCK_FACTOR * expected {
                suggestions.push(RestockSuggestion {
                    item: entry.item.clone(),
                    days_since_last_purchase: days_passed,
                    reason,
                });
            }
        }

        suggestions
    }

    /// Expiry alerts as of today.
    pub fn check_expiry_alerts(&self) -> Vec<ExpiryAlert> {
        self.check_expiry_alerts_on(today())
    }

    /// Expiry alerts as of an explicit date.
    ///
    /// Expired records stay in the history (and keep alerting) until the
    /// caller removes them explicitly.
    pub fn check_expiry_alerts_on(&self, today: NaiveDate) -> Vec<ExpiryAlert> {
        let mut alerts = Vec::new();

        for (record_index, record) in self.document.purchase_history.iter().enumerate() {
            let Some(days_left) = record.expiry.days_left(today) else {
                continue;
            };
            let kind = if days_left < 0 {
                AlertKind::Expired
            } else if days_left <= CRITICAL_WINDOW_DAYS {
                AlertKind::Critical
            } else {
                continue;
            };
            alerts.push(ExpiryAlert {
                kind,
                item: record.item.clone(),
                record_id: record.id,
                record_index,
                days_left,
            });
        }

        alerts
    }

    /// Remove a history record by position. Returns false when the index
    /// is out of bounds.
    pub fn remove_from_history(&mut self, index: usize) -> Result<bool, EngineError> {
        if index >= self.document.purchase_history.len() {
            return Ok(false);
        }
        self.document.purchase_history.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Remove a history record by its stable id. Returns false when no
    /// record carries the id.
    pub fn remove_record(&mut self, id: Uuid) -> Result<bool, EngineError> {
        let before = self.document.purchase_history.len();
        self.document.purchase_history.retain(|r| r.id != id);
        if self.document.purchase_history.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Swap `old_name` for `new_name` in place on the want list,
    /// preserving its position.
    pub fn replace_item(&mut self, old_name: &str, new_name: &str) -> Result<String, EngineError> {
        let old_item = normalize_item(old_name);
        let new_item = normalize_item(new_name);
        if new_item.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let Some(position) = self.document.want_position(&old_item) else {
            return Err(EngineError::ItemNotFound(old_item));
        };
        if self.document.want_position(&new_item) == Some(position) {
            // Replacing an item with itself is a no-op.
        } else if self.document.wants(&new_item) {
            return Err(EngineError::DuplicateItem(new_item));
        }

        self.document.want_list[position] = new_item.clone();
        self.persist()?;
        Ok(format!("Swapped '{}' for '{}'", old_item, new_item))
    }

    /// Drop an item from the want list. The purchase history is never
    /// affected. Returns false when the item was not listed.
    pub fn remove_item(&mut self, name: &str) -> Result<bool, EngineError> {
        let item = normalize_item(name);
        if !self.document.remove_want(&item) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Current preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.document.preferences
    }

    /// Set the dietary preference and persist.
    pub fn set_diet(&mut self, diet: Diet) -> Result<(), EngineError> {
        self.document.preferences.diet = diet;
        self.persist()?;
        Ok(())
    }

    /// Replace the document with the empty default and persist.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.document = Document::default();
        self.persist()?;
        Ok(())
    }

    /// Ask the oracle whether `item` fits the user's diet. `None` when
    /// no restriction is set or the oracle is unavailable.
    pub fn dietary_check(&self, item: &str) -> Option<String> {
        let diet = self.document.preferences.diet;
        if diet == Diet::None {
            return None;
        }
        self.ask_oracle(&format!(
            "I follow a {} diet. Is '{}' allowed? Answer 'YES' or 'NO' \
             followed by a short reason.",
            diet, item
        ))
    }

    /// Suggest recipes from the want list and the last ten purchases.
    pub fn suggest_recipes(&self) -> String {
        let mut ingredients: Vec<String> = self.document.want_list.clone();
        for record in self.document.purchase_history.iter().rev().take(10) {
            if !ingredients.contains(&record.item) {
                ingredients.push(record.item.clone());
            }
        }
        if ingredients.is_empty() {
            return "Nothing on hand yet. Add or buy some items first.".to_string();
        }
        self.ask_oracle_or_fallback(&format!(
            "I have: {}. Suggest 3 simple recipes.",
            ingredients.join(", ")
        ))
    }

    /// Sort the want list into store aisles.
    pub fn categorize_list(&self) -> String {
        if self.document.want_list.is_empty() {
            return "The list is empty.".to_string();
        }
        self.ask_oracle_or_fallback(&format!(
            "Sort these grocery items into store aisles (Produce, Dairy, \
             Bakery, ...): {}. Return a clean list.",
            self.document.want_list.join(", ")
        ))
    }

    /// One general shopping tip for the current list.
    pub fn shopping_tips(&self) -> String {
        self.ask_oracle_or_fallback(&format!(
            "Give one short, practical shopping tip for this grocery \
             list: {}.",
            self.document.want_list.join(", ")
        ))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn interval_mean(intervals: &[i64]) -> f64 {
    intervals.iter().sum::<i64>() as f64 / intervals.len() as f64
}

fn expiry_from_days(today: NaiveDate, days: i64) -> Expiry {
    if days > 0 {
        Expiry::Date(today + Duration::days(days))
    } else {
        Expiry::NonPerishable
    }
}

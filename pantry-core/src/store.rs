//! Whole-document JSON persistence.
//!
//! The store reads and writes a single JSON file holding the full
//! [`Document`]. There are no partial writes and no versioning; a missing
//! or unparseable file is recovered by starting from the empty default
//! document, and that recovery is an explicit, observable branch rather
//! than a silent catch-all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Document;

/// Default store filename inside the data directory.
pub const DEFAULT_STORE_FILE: &str = "grocery_data.json";

/// Errors from the store. Malformed content is not an error (see
/// [`LoadSource::Malformed`]); these cover genuine I/O and encoding
/// failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read store file '{0}': {1}")]
    Read(PathBuf, io::Error),

    #[error("Failed to write store file '{0}': {1}")]
    Write(PathBuf, io::Error),

    #[error("Failed to encode document: {0}")]
    Encode(serde_json::Error),
}

/// How the loaded document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the store file.
    Loaded,
    /// No store file existed; default document.
    Missing,
    /// Store file existed but did not parse; default document. The
    /// corrupt file is left in place and overwritten on the next save.
    Malformed,
}

/// Result of loading the document.
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: Document,
    pub source: LoadSource,
}

/// JSON file store for the grocery document.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store over the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// Missing and malformed files both yield the default document, with
    /// the distinction reported in [`LoadOutcome::source`]. Only genuine
    /// I/O failures return an error.
    pub fn load(&self) -> Result<LoadOutcome, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(LoadOutcome {
                    document: Document::default(),
                    source: LoadSource::Missing,
                });
            }
            Err(e) => return Err(StoreError::Read(self.path.clone(), e)),
        };

        match serde_json::from_str(&contents) {
            Ok(document) => Ok(LoadOutcome {
                document,
                source: LoadSource::Loaded,
            }),
            Err(e) => {
                tracing::warn!(
                    "Store file '{}' is malformed ({}); starting from an empty document",
                    self.path.display(),
                    e
                );
                Ok(LoadOutcome {
                    document: Document::default(),
                    source: LoadSource::Malformed,
                })
            }
        }
    }

    /// Write the full document, creating the parent directory if needed.
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Write(parent.to_path_buf(), e))?;
            }
        }

        let json = serde_json::to_string_pretty(document).map_err(StoreError::Encode)?;
        fs::write(&self.path, json).map_err(|e| StoreError::Write(self.path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::models::{Expiry, ExpirySource, PurchaseRecord};

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join(DEFAULT_STORE_FILE));

        let outcome = store.load().unwrap();
        assert_eq!(outcome.source, LoadSource::Missing);
        assert_eq!(outcome.document, Document::default());
    }

    #[test]
    fn test_load_malformed_file_recovers_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_FILE);
        fs::write(&path, "{ this is not json").unwrap();

        let store = JsonStore::new(path);
        let outcome = store.load().unwrap();
        assert_eq!(outcome.source, LoadSource::Malformed);
        assert_eq!(outcome.document, Document::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_STORE_FILE);

        let store = JsonStore::new(path.clone());
        store.save(&Document::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join(DEFAULT_STORE_FILE));

        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let mut doc = Document::default();
        doc.want_list.push("bread".to_string());
        doc.last_purchase.set("milk", today);
        doc.purchase_intervals.insert("milk".to_string(), vec![7]);
        doc.purchase_history.push(PurchaseRecord::new(
            "milk",
            1,
            today,
            Expiry::NonPerishable,
            ExpirySource::Oracle,
        ));

        store.save(&doc).unwrap();
        let outcome = store.load().unwrap();
        assert_eq!(outcome.source, LoadSource::Loaded);
        assert_eq!(outcome.document, doc);
    }

    #[test]
    fn test_load_document_with_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_FILE);
        fs::write(&path, r#"{"want_list": ["eggs"]}"#).unwrap();

        let store = JsonStore::new(path);
        let outcome = store.load().unwrap();
        assert_eq!(outcome.source, LoadSource::Loaded);
        assert_eq!(outcome.document.want_list, vec!["eggs".to_string()]);
        assert!(outcome.document.purchase_history.is_empty());
    }
}

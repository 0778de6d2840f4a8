//! Whole-namespace export and import.
//!
//! The export document is a JSON object mapping each full key name to its raw
//! stored string. Import validates the entire document before touching the
//! store, then replaces the namespace.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::kv::KeyValueStore;

/// Key name to raw stored value
pub type TransferDocument = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Import file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Import file must contain a JSON object of key/value pairs")]
    NotAnObject,

    #[error("Value for key {0:?} must be a string")]
    NonStringValue(String),

    #[error("Key {key:?} cannot be stored: {reason:#}")]
    InvalidKey { key: String, reason: anyhow::Error },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Suggested export file name for `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("habit-idle-export-{}.json", date.format("%Y-%m-%d"))
}

/// Collect every key in the namespace
pub fn collect<K: KeyValueStore>(store: &K) -> Result<TransferDocument, TransferError> {
    let mut doc = TransferDocument::new();
    for key in store.keys()? {
        if let Some(value) = store.get_raw(&key)? {
            doc.insert(key, value);
        }
    }
    Ok(doc)
}

/// Pretty-printed export of the whole namespace
pub fn export_document<K: KeyValueStore>(store: &K) -> Result<String, TransferError> {
    let doc = collect(store)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse and validate an export document without writing anything
pub fn parse_document(text: &str) -> Result<TransferDocument, TransferError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(TransferError::NotAnObject);
    };

    let mut doc = TransferDocument::new();
    for (key, value) in map {
        match value {
            Value::String(s) => {
                doc.insert(key, s);
            }
            _ => return Err(TransferError::NonStringValue(key)),
        }
    }
    Ok(doc)
}

/// Replace the namespace with `doc`. Returns how many keys were written;
/// keys outside the namespace are skipped. Every key is checked against the
/// store first; on a rejected key the store is left untouched.
pub fn import_document<K: KeyValueStore>(
    store: &K,
    doc: &TransferDocument,
) -> Result<usize, TransferError> {
    for full_key in doc.keys() {
        if let Some(key) = store.local_key(full_key) {
            store
                .validate_key(key)
                .map_err(|reason| TransferError::InvalidKey {
                    key: full_key.clone(),
                    reason,
                })?;
        }
    }

    store.clear()?;
    let mut written = 0;
    for (key, value) in doc {
        if store.set_raw(key, value)? {
            written += 1;
        }
    }
    info!(written, skipped = doc.len() - written, "Imported data");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename(date), "habit-idle-export-2024-03-09.json");
    }

    #[test]
    fn test_export_contains_raw_values() {
        let store = MemoryStore::default();
        store.set("gamestate", r#"{"habits":[]}"#).unwrap();

        let text = export_document(&store).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lgh_gamestate"], r#"{"habits":[]}"#);
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        assert!(matches!(parse_document("nope"), Err(TransferError::InvalidJson(_))));
        assert!(matches!(parse_document("[1]"), Err(TransferError::NotAnObject)));
        assert!(matches!(
            parse_document(r#"{"lgh_gamestate": {"a": 1}}"#),
            Err(TransferError::NonStringValue(k)) if k == "lgh_gamestate"
        ));
    }

    #[test]
    fn test_import_replaces_namespace() {
        let store = MemoryStore::default();
        store.set("stale", "1").unwrap();

        let doc = parse_document(r#"{"lgh_gamestate": "{}", "foreign_key": "x"}"#).unwrap();
        let written = import_document(&store, &doc).unwrap();

        assert_eq!(written, 1);
        assert_eq!(store.keys().unwrap(), vec!["lgh_gamestate"]);
        assert_eq!(store.get("gamestate").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_failed_parse_leaves_store_untouched() {
        let store = MemoryStore::default();
        store.set("gamestate", "{\"keep\":true}").unwrap();

        assert!(parse_document("{broken").is_err());
        assert_eq!(store.get("gamestate").unwrap().as_deref(), Some("{\"keep\":true}"));
    }
}

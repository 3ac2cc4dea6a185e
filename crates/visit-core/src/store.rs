//! Visit Store
//!
//! JSON-file-backed visit counters, one record per establishment.
//!
//! The whole document is rewritten on every mutation. The file shape is:
//!
//! ```text
//! {
//!   "restaurantes": {
//!     "rest_001": { "visitas": 3 },
//!     "com_002": { "visitas": 0 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::{Result, StoreError};

/// Visit counter for one establishment
///
/// Reading is lenient: integral floats (`3.0`) are accepted, and a missing,
/// negative or non-numeric count reads as zero instead of failing the
/// whole document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    #[serde(rename = "visitas")]
    pub visits: u64,
}

impl<'de> Deserialize<'de> for VisitRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let visits = value.get("visitas").map_or(0, lenient_count);
        Ok(Self { visits })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn lenient_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map_or(0, |f| f as u64)
        }),
        _ => 0,
    }
}

/// The full persisted document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(rename = "restaurantes", default)]
    pub establishments: BTreeMap<String, VisitRecord>,

    /// Unrelated top-level keys, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoreDocument {
    /// Visit count for `id`, if it has a record
    pub fn count(&self, id: &str) -> Option<u64> {
        self.establishments.get(id).map(|record| record.visits)
    }

    /// Insert a zero-count record for `id`. Returns `true` if one was added.
    pub fn ensure(&mut self, id: &str) -> bool {
        if self.establishments.contains_key(id) {
            return false;
        }
        self.establishments.insert(id.to_string(), VisitRecord::default());
        true
    }

    /// Add one visit to `id`, creating the record if needed
    pub fn increment(&mut self, id: &str) -> u64 {
        let record = self.establishments.entry(id.to_string()).or_default();
        record.visits = record.visits.saturating_add(1);
        record.visits
    }
}

/// Visit storage trait
///
/// Constructed once at startup and shared with every request handler.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Current document, loading it on first use
    async fn load(&self) -> Result<StoreDocument>;

    /// Replace the persisted document
    async fn save(&self, document: StoreDocument) -> Result<()>;

    /// Create a zero-count record for `id` if absent
    async fn ensure(&self, id: &str) -> Result<()>;

    /// Visit count for `id`, creating a zero-count record if absent
    async fn get_count(&self, id: &str) -> Result<u64>;

    /// Record one visit and return the new count
    async fn increment(&self, id: &str) -> Result<u64>;
}

/// Visit store persisted as a single JSON file with an in-memory cache
///
/// Every read-modify-write runs under one async mutex, so concurrent
/// increments inside this process are not lost. Other processes writing
/// the same file are not coordinated with.
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Option<StoreDocument>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file, creating it when missing.
    ///
    /// Unreadable or malformed files fall back to an empty document, which
    /// replaces the file contents on the next mutation.
    async fn read_or_init(&self) -> Result<StoreDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(document) => Ok(document),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        "Malformed visit store, starting empty: {}", e
                    );
                    Ok(StoreDocument::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let document = StoreDocument::default();
                self.write(&document).await?;
                tracing::info!(path = %self.path.display(), "Created empty visit store");
                Ok(document)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Could not read visit store, starting empty: {}", e
                );
                Ok(StoreDocument::default())
            }
        }
    }

    async fn write(&self, document: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), "Failed to save visit store: {}", e);
            StoreError::io(&self.path, e)
        })
    }

    /// Apply `change` to a copy of the document and persist it when the
    /// change reports it as modified. The cache only moves forward once the
    /// file write succeeded.
    async fn update<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> (T, bool) + Send,
        T: Send,
    {
        let mut cache = self.cache.lock().await;

        let mut document = match cache.as_ref() {
            Some(document) => document.clone(),
            None => self.read_or_init().await?,
        };

        let (value, modified) = change(&mut document);
        if modified {
            self.write(&document).await?;
        }

        *cache = Some(document);
        Ok(value)
    }
}

#[async_trait]
impl VisitStore for JsonFileStore {
    async fn load(&self) -> Result<StoreDocument> {
        let mut cache = self.cache.lock().await;
        if let Some(document) = cache.as_ref() {
            return Ok(document.clone());
        }

        let document = self.read_or_init().await?;
        *cache = Some(document.clone());
        Ok(document)
    }

    async fn save(&self, document: StoreDocument) -> Result<()> {
        let mut cache = self.cache.lock().await;
        self.write(&document).await?;
        *cache = Some(document);
        Ok(())
    }

    async fn ensure(&self, id: &str) -> Result<()> {
        self.update(|document| ((), document.ensure(id))).await
    }

    async fn get_count(&self, id: &str) -> Result<u64> {
        self.update(|document| {
            let created = document.ensure(id);
            (document.count(id).unwrap_or_default(), created)
        })
        .await
    }

    async fn increment(&self, id: &str) -> Result<u64> {
        let visits = self.update(|document| (document.increment(id), true)).await?;
        tracing::debug!(establishment = id, visits, "Visit recorded");
        Ok(visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_increment_sequence() {
        let (_dir, store) = temp_store();

        assert_eq!(store.increment("rest_001").await.unwrap(), 1);
        assert_eq!(store.increment("rest_001").await.unwrap(), 2);
        assert_eq!(store.increment("rest_001").await.unwrap(), 3);
        assert_eq!(store.get_count("rest_001").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_created_empty() {
        let (_dir, store) = temp_store();

        let document = store.load().await.unwrap();
        assert!(document.establishments.is_empty());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json, serde_json::json!({"restaurantes": {}}));
    }

    #[tokio::test]
    async fn test_file_shape_after_increment() {
        let (_dir, store) = temp_store();
        store.increment("com_002").await.unwrap();
        store.increment("com_002").await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"restaurantes": {"com_002": {"visitas": 2}}})
        );
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let (_dir, store) = temp_store();
        store.increment("rest_002").await.unwrap();
        store.increment("rest_002").await.unwrap();

        store.ensure("rest_002").await.unwrap();
        store.ensure("rest_002").await.unwrap();
        assert_eq!(store.get_count("rest_002").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_count_initializes_record() {
        let (_dir, store) = temp_store();

        assert_eq!(store.get_count("rest_004").await.unwrap(), 0);

        let reopened = JsonFileStore::new(store.path());
        let document = reopened.load().await.unwrap();
        assert_eq!(document.count("rest_004"), Some(0));
    }

    #[tokio::test]
    async fn test_counts_survive_reopen() {
        let (_dir, store) = temp_store();
        store.increment("rest_003").await.unwrap();

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.increment("rest_003").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back_to_empty() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), "{ not json").unwrap();

        let document = store.load().await.unwrap();
        assert!(document.establishments.is_empty());

        // Untouched until the next mutation
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");

        assert_eq!(store.increment("rest_001").await.unwrap(), 1);
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(serde_json::from_str::<StoreDocument>(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_missing_keys_read_as_empty() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), r#"{"restaurantes": {"rest_005": {}}}"#).unwrap();
        assert_eq!(store.get_count("rest_005").await.unwrap(), 0);

        let (_dir2, bare) = temp_store();
        std::fs::write(bare.path(), "{}").unwrap();
        assert!(bare.load().await.unwrap().establishments.is_empty());
    }

    #[tokio::test]
    async fn test_odd_records_do_not_wipe_the_file() {
        let (_dir, store) = temp_store();
        std::fs::write(
            store.path(),
            r#"{
                "restaurantes": {
                    "rest_001": {"visitas": 40},
                    "rest_002": {"visitas": 3.0},
                    "rest_003": {"visitas": "muchas"},
                    "rest_004": 7
                },
                "version": 2
            }"#,
        )
        .unwrap();

        assert_eq!(store.increment("rest_001").await.unwrap(), 41);
        assert_eq!(store.increment("rest_002").await.unwrap(), 4);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "restaurantes": {
                    "rest_001": {"visitas": 41},
                    "rest_002": {"visitas": 4},
                    "rest_003": {"visitas": 0},
                    "rest_004": {"visitas": 0}
                },
                "version": 2
            })
        );
    }

    #[test]
    fn test_increment_saturates() {
        let mut document = StoreDocument::default();
        document
            .establishments
            .insert("com_003".into(), VisitRecord { visits: u64::MAX });

        assert_eq!(document.increment("com_003"), u64::MAX);
        assert_eq!(document.increment("com_001"), 1);
    }

    #[tokio::test]
    async fn test_cache_ignores_external_edits() {
        let (_dir, store) = temp_store();
        store.increment("com_001").await.unwrap();

        std::fs::write(
            store.path(),
            r#"{"restaurantes": {"com_001": {"visitas": 40}}}"#,
        )
        .unwrap();

        assert_eq!(store.get_count("com_001").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_document() {
        let (_dir, store) = temp_store();
        let mut document = StoreDocument::default();
        document.establishments.insert("rest_001".into(), VisitRecord { visits: 7 });

        store.save(document).await.unwrap();
        assert_eq!(store.increment("rest_001").await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let store = JsonFileStore::new(blocker.join("data.json"));
        let result = store.increment("rest_001").await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment("rest_001").await.unwrap() })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get_count("rest_001").await.unwrap(), 25);
    }
}

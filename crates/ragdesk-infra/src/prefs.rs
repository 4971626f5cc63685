//! Named key-value preference store backed by a JSON file.
//!
//! Each named store is one file, `{dir}/{name}.json`, holding a JSON object
//! whose keys map to string arrays. Implements [`ContextStore`] for the
//! known-contexts registry. Writes go through a temp file and an atomic
//! rename so a crash never leaves a half-written store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ragdesk_core::registry::{ContextStore, PREFS_NAME};
use ragdesk_types::error::RepositoryError;
use serde_json::Value;
use tracing::debug;

/// JSON-file preference store.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// Open the store `name` inside `dir`. The file is created on first write.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.json")),
        }
    }

    /// Open the context registry store under `{data_dir}/prefs/`.
    pub fn open_default(data_dir: &Path) -> Self {
        Self::new(&data_dir.join("prefs"), PREFS_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, Value>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(RepositoryError::Io(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_all(&self, entries: &BTreeMap<String, Value>) -> Result<(), RepositoryError> {
        let io_err = |e: std::io::Error| {
            RepositoryError::Io(format!("failed to write {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)?;
        Ok(())
    }
}

impl ContextStore for PrefsStore {
    async fn load_set(&self, key: &str) -> Result<BTreeSet<String>, RepositoryError> {
        let entries = self.read_all().await?;
        match entries.get(key) {
            None => Ok(BTreeSet::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                RepositoryError::Serialization(format!("key '{key}' is not a string set: {e}"))
            }),
        }
    }

    async fn save_set(&self, key: &str, values: &BTreeSet<String>) -> Result<(), RepositoryError> {
        let mut entries = self.read_all().await?;
        let value = serde_json::to_value(values)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries).await?;
        debug!(path = %self.path.display(), key, count = values.len(), "Preference set saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::registry::{ContextRegistry, KEY_COMPANY_SET};
    use tempfile::TempDir;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn missing_file_loads_empty_set() {
        let tmp = TempDir::new().unwrap();
        let store = PrefsStore::open_default(tmp.path());
        assert!(store.load_set(KEY_COMPANY_SET).await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn save_then_load_in_fresh_instance() {
        let tmp = TempDir::new().unwrap();
        let store = PrefsStore::open_default(tmp.path());
        store
            .save_set(KEY_COMPANY_SET, &set(&["Acme Corp", "Globex"]))
            .await
            .unwrap();

        let reopened = PrefsStore::open_default(tmp.path());
        let loaded = reopened.load_set(KEY_COMPANY_SET).await.unwrap();
        assert_eq!(loaded, set(&["Acme Corp", "Globex"]));
        assert_eq!(
            reopened.path(),
            tmp.path().join("prefs").join("CompanyPrefs.json")
        );
    }

    #[tokio::test]
    async fn save_keeps_other_keys() {
        let tmp = TempDir::new().unwrap();
        let store = PrefsStore::new(tmp.path(), "Test");
        store.save_set("a", &set(&["1"])).await.unwrap();
        store.save_set("b", &set(&["2"])).await.unwrap();

        assert_eq!(store.load_set("a").await.unwrap(), set(&["1"]));
        assert_eq!(store.load_set("b").await.unwrap(), set(&["2"]));
        assert!(!tmp.path().join("Test.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_serialization_error() {
        let tmp = TempDir::new().unwrap();
        let store = PrefsStore::new(tmp.path(), "Broken");
        tokio::fs::write(store.path(), "{ not json").await.unwrap();

        let err = store.load_set(KEY_COMPANY_SET).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[tokio::test]
    async fn wrong_value_type_is_serialization_error() {
        let tmp = TempDir::new().unwrap();
        let store = PrefsStore::new(tmp.path(), "Typed");
        tokio::fs::write(store.path(), r#"{"CompanySet": 42}"#)
            .await
            .unwrap();

        let err = store.load_set(KEY_COMPANY_SET).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[tokio::test]
    async fn registry_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let registry = ContextRegistry::new(PrefsStore::open_default(tmp.path()), "병무청");
        registry.add("Acme Corp").await.unwrap();

        let reopened = ContextRegistry::new(PrefsStore::open_default(tmp.path()), "병무청");
        let names = reopened.list().await.unwrap();
        assert_eq!(names, set(&["Acme Corp", "병무청"]));
    }
}

//! Known-contexts registry.
//!
//! Defines the `ContextStore` port (a named key-value blob holding string
//! sets) and `ContextRegistry`, which layers the built-in default context on
//! top of whatever has been stored. Implementations of the store live in
//! ragdesk-infra.

use std::collections::BTreeSet;

use ragdesk_types::error::{RegistryError, RepositoryError, ValidationError};
use tracing::debug;

/// Name of the preference store holding registered contexts.
pub const PREFS_NAME: &str = "CompanyPrefs";

/// Key of the context-name set within the store.
pub const KEY_COMPANY_SET: &str = "CompanySet";

/// Trait for the persisted string-set store.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait ContextStore: Send + Sync {
    /// Load the set stored under `key`. A missing key is an empty set.
    fn load_set(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<BTreeSet<String>, RepositoryError>> + Send;

    /// Replace the set stored under `key`.
    fn save_set(
        &self,
        key: &str,
        values: &BTreeSet<String>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Set of context names offered for selection.
///
/// Always contains `default_name`, even on an empty store. Only successful
/// manual registrations add to it.
pub struct ContextRegistry<S: ContextStore> {
    store: S,
    default_name: String,
}

impl<S: ContextStore> ContextRegistry<S> {
    pub fn new(store: S, default_name: impl Into<String>) -> Self {
        Self {
            store,
            default_name: default_name.into(),
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All known names plus the default, deduplicated and sorted.
    pub async fn list(&self) -> Result<BTreeSet<String>, RepositoryError> {
        let mut names = self.store.load_set(KEY_COMPANY_SET).await?;
        names.insert(self.default_name.clone());
        Ok(names)
    }

    pub async fn contains(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.list().await?.contains(name))
    }

    /// Add a name. Returns whether the stored set changed.
    ///
    /// Existing names are a no-op and leave the store untouched. Blank names
    /// are rejected with `ValidationError::EmptyContextName`.
    pub async fn add(&self, name: &str) -> Result<bool, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyContextName.into());
        }

        let mut names = self.store.load_set(KEY_COMPANY_SET).await?;
        if !names.insert(name.to_string()) {
            debug!(name, "Context already registered");
            return Ok(false);
        }

        self.store.save_set(KEY_COMPANY_SET, &names).await?;
        debug!(name, total = names.len(), "Context registered");
        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store counting writes.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        sets: Mutex<HashMap<String, BTreeSet<String>>>,
        pub(crate) saves: AtomicUsize,
    }

    impl ContextStore for MemoryStore {
        async fn load_set(&self, key: &str) -> Result<BTreeSet<String>, RepositoryError> {
            Ok(self
                .sets
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .unwrap_or_default())
        }

        async fn save_set(
            &self,
            key: &str,
            values: &BTreeSet<String>,
        ) -> Result<(), RepositoryError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.sets
                .lock()
                .unwrap()
                .insert(key.to_string(), values.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn list_contains_default_on_empty_store() {
        let registry = ContextRegistry::new(MemoryStore::default(), "병무청");
        let names = registry.list().await.unwrap();
        assert_eq!(names.len(), 1);
        assert!(names.contains("병무청"));
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let registry = ContextRegistry::new(MemoryStore::default(), "Default");

        assert!(registry.add("Acme").await.unwrap());
        let once = registry.list().await.unwrap();
        assert!(!registry.add("Acme").await.unwrap());
        let twice = registry.list().await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(registry.store().saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn list_dedups_stored_default() {
        let registry = ContextRegistry::new(MemoryStore::default(), "Default");
        registry.add("Default").await.unwrap();
        registry.add("Acme").await.unwrap();

        let names: Vec<String> = registry.list().await.unwrap().into_iter().collect();
        assert_eq!(names, vec!["Acme".to_string(), "Default".to_string()]);
    }

    #[tokio::test]
    async fn add_blank_name_is_rejected() {
        let registry = ContextRegistry::new(MemoryStore::default(), "Default");
        for blank in ["", "   "] {
            let err = registry.add(blank).await.unwrap_err();
            assert!(matches!(
                err,
                RegistryError::Validation(ValidationError::EmptyContextName)
            ));
        }
        assert_eq!(registry.store().saves.load(Ordering::SeqCst), 0);
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_trims_before_storing() {
        let registry = ContextRegistry::new(MemoryStore::default(), "Default");
        assert!(registry.add("  Acme  ").await.unwrap());
        assert!(registry.contains("Acme").await.unwrap());
        assert!(!registry.add("Acme").await.unwrap());
    }

    #[tokio::test]
    async fn contains_checks_default_and_stored() {
        let registry = ContextRegistry::new(MemoryStore::default(), "Default");
        registry.add("Acme").await.unwrap();
        assert!(registry.contains("Default").await.unwrap());
        assert!(registry.contains("Acme").await.unwrap());
        assert!(!registry.contains("Globex").await.unwrap());
    }
}

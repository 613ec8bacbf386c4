use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ambulance_storage::DynDocumentStore;

use crate::InMemoryStore;

/// Supported storage backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory storage implemented on top of dashmap::DashMap
    #[default]
    Memory,
}

/// Storage-specific tuning hints.
#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
    /// Optional preallocation hint (initial map capacity).
    pub preallocate_items: Option<usize>,
}

/// Factory configuration to construct a store instance.
///
/// Deserialized from the `[storage]` section of the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Collection name reported in storage errors and logs.
    pub collection: String,
    pub preallocate_items: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            collection: "ambulance".to_string(),
            preallocate_items: None,
        }
    }
}

impl StorageConfig {
    pub fn options(&self) -> StorageOptions {
        StorageOptions {
            preallocate_items: self.preallocate_items,
        }
    }
}

/// Create a document store based on the provided configuration.
pub fn create_store<T>(config: &StorageConfig) -> DynDocumentStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    match config.backend {
        StorageBackend::Memory => {
            tracing::debug!(collection = %config.collection, "Creating in-memory document store");
            Arc::new(InMemoryStore::<T>::with_options(
                config.collection.clone(),
                config.options(),
            ))
        }
    }
}

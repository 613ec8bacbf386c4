use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ambulance_storage::{StorageError, StoredDocument};

use crate::factory::StorageOptions;

/// In-memory document store backed by a sharded concurrent map.
///
/// This storage implementation provides:
/// - Concurrent access via `DashMap`; shard locks are held only inside a call
/// - Whole-document create/find/update/delete keyed by document ID
/// - A monotonically increasing revision per write for optimistic concurrency
#[derive(Debug)]
pub struct InMemoryStore<T> {
    /// Name used in error messages and logs (e.g. "ambulance")
    pub(crate) collection: String,
    /// Main storage: document id -> current revision
    pub(crate) data: Arc<DashMap<String, StoredDocument<T>>>,
    /// Atomic counter for generating revision IDs
    pub(crate) version_counter: AtomicU64,
}

impl<T: Clone> InMemoryStore<T> {
    /// Creates a new in-memory store for the given collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self::with_options(collection, StorageOptions::default())
    }

    /// Creates a new in-memory store with the given options.
    pub fn with_options(collection: impl Into<String>, options: StorageOptions) -> Self {
        let data = match options.preallocate_items {
            Some(capacity) => DashMap::with_capacity(capacity),
            None => DashMap::new(),
        };
        Self {
            collection: collection.into(),
            data: Arc::new(data),
            version_counter: AtomicU64::new(1),
        }
    }

    /// Generates the next revision ID.
    pub(crate) fn next_version(&self) -> String {
        self.version_counter
            .fetch_add(1, Ordering::SeqCst)
            .to_string()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<StoredDocument<T>, StorageError> {
        self.data
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::not_found(&self.collection, id))
    }

    pub fn insert(&self, id: &str, document: T) -> Result<StoredDocument<T>, StorageError> {
        match self.data.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StorageError::already_exists(&self.collection, id)),
            Entry::Vacant(vacant) => {
                let stored = StoredDocument::new(id, self.next_version(), document);
                vacant.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    pub fn replace(
        &self,
        id: &str,
        document: T,
        if_match: Option<&str>,
    ) -> Result<StoredDocument<T>, StorageError> {
        let mut current = self
            .data
            .get_mut(id)
            .ok_or_else(|| StorageError::not_found(&self.collection, id))?;

        if let Some(expected_version) = if_match {
            if current.version_id != expected_version {
                return Err(StorageError::version_conflict(
                    expected_version,
                    current.version_id.clone(),
                ));
            }
        }

        let next = current.new_version(self.next_version(), document);
        *current = next.clone();
        Ok(next)
    }

    pub fn remove(&self, id: &str) -> Result<StoredDocument<T>, StorageError> {
        self.data
            .remove(id)
            .map(|(_, stored)| stored)
            .ok_or_else(|| StorageError::not_found(&self.collection, id))
    }
}

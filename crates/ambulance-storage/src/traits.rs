//! Storage traits for the document store abstraction layer.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::StoredDocument;

/// Key-value document persistence, generic over the document type.
///
/// Implementations must be safe to share between many in-flight requests
/// (`Send + Sync`). Concurrent writers are not serialized by callers; a
/// backend detects lost updates through the `if_match` revision on
/// [`DocumentStore::update`] and reports [`StorageError::VersionConflict`].
///
/// # Example
///
/// ```ignore
/// use ambulance_storage::{DocumentStore, StorageError};
///
/// async fn rename(store: &dyn DocumentStore<Ambulance>, id: &str) -> Result<(), StorageError> {
///     let stored = store.find(id).await?;
///     let mut ambulance = stored.document;
///     ambulance.add_field("name", "Triage".into());
///     store.update(id, &ambulance, Some(&stored.version_id)).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Reads a document by ID.
    ///
    /// The returned value is an owned copy; mutating it never affects the
    /// stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no document is stored under `id`.
    async fn find(&self, id: &str) -> Result<StoredDocument<T>, StorageError>;

    /// Stores a new document under `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a document with the same ID exists.
    async fn create(&self, id: &str, document: &T) -> Result<StoredDocument<T>, StorageError>;

    /// Replaces the document stored under `id`.
    ///
    /// If `if_match` is provided, the write only succeeds if the stored
    /// revision still equals it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    /// Returns `StorageError::VersionConflict` if `if_match` is provided and doesn't match.
    async fn update(
        &self,
        id: &str,
        document: &T,
        if_match: Option<&str>,
    ) -> Result<StoredDocument<T>, StorageError>;

    /// Deletes the document stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

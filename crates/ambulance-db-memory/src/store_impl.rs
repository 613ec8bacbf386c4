//! Implementation of the DocumentStore trait for InMemoryStore.

use async_trait::async_trait;

use ambulance_storage::{DocumentStore, StorageError, StoredDocument};

use crate::storage::InMemoryStore;

#[async_trait]
impl<T> DocumentStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn find(&self, id: &str) -> Result<StoredDocument<T>, StorageError> {
        self.get(id)
    }

    async fn create(&self, id: &str, document: &T) -> Result<StoredDocument<T>, StorageError> {
        let stored = self.insert(id, document.clone())?;
        tracing::debug!(
            collection = %self.collection,
            id = %id,
            version = %stored.version_id,
            "Document created"
        );
        Ok(stored)
    }

    async fn update(
        &self,
        id: &str,
        document: &T,
        if_match: Option<&str>,
    ) -> Result<StoredDocument<T>, StorageError> {
        let stored = self.replace(id, document.clone(), if_match)?;
        tracing::debug!(
            collection = %self.collection,
            id = %id,
            version = %stored.version_id,
            "Document updated"
        );
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.remove(id)?;
        tracing::debug!(collection = %self.collection, id = %id, "Document deleted");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

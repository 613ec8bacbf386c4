//! Storage types for the document store abstraction layer.

use time::OffsetDateTime;

/// A document as held by a storage backend, together with its revision.
#[derive(Debug, Clone)]
pub struct StoredDocument<T> {
    /// The document ID.
    pub id: String,
    /// Revision token; changes on every successful write.
    pub version_id: String,
    /// The document content.
    pub document: T,
    /// When this revision was written.
    pub last_updated: OffsetDateTime,
    /// When the document was originally created.
    pub created_at: OffsetDateTime,
}

impl<T> StoredDocument<T> {
    /// Creates a new `StoredDocument`.
    #[must_use]
    pub fn new(id: impl Into<String>, version_id: impl Into<String>, document: T) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            version_id: version_id.into(),
            document,
            last_updated: now,
            created_at: now,
        }
    }

    /// Creates the next revision of this document with new content.
    #[must_use]
    pub fn new_version(&self, version_id: impl Into<String>, document: T) -> Self {
        Self {
            id: self.id.clone(),
            version_id: version_id.into(),
            document,
            last_updated: OffsetDateTime::now_utc(),
            created_at: self.created_at,
        }
    }

    /// Consumes the wrapper and returns the document content.
    #[must_use]
    pub fn into_document(self) -> T {
        self.document
    }
}

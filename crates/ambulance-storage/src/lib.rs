//! # ambulance-storage
//!
//! Document store abstraction layer for the ambulance API.
//!
//! This crate defines the traits and types that all storage backends must implement.
//! It does not contain any implementations - those are provided by separate crates.
//!
//! ## Overview
//!
//! The main trait is [`DocumentStore`], which defines the contract for:
//! - `find` / `create` / `update` / `delete` of whole documents by ID
//! - optimistic concurrency through revision tokens (`if_match` on update)
//!
//! ## Storage Backends
//!
//! To implement a storage backend, implement the [`DocumentStore`] trait:
//!
//! ```ignore
//! use async_trait::async_trait;
//! use ambulance_storage::{DocumentStore, StorageError, StoredDocument};
//!
//! struct MyStore {
//!     // ...
//! }
//!
//! #[async_trait]
//! impl DocumentStore<Ambulance> for MyStore {
//!     async fn find(&self, id: &str) -> Result<StoredDocument<Ambulance>, StorageError> {
//!         // Implementation
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::{ErrorCategory, StorageError};
pub use traits::DocumentStore;
pub use types::StoredDocument;

/// Type alias for a shareable document store trait object.
pub type DynDocumentStore<T> = std::sync::Arc<dyn DocumentStore<T>>;


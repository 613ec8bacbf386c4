//! In-memory document store backend for the ambulance API.
//!
//! This crate provides an in-memory implementation of the `DocumentStore` trait
//! from `ambulance-storage`, using a sharded `DashMap` for concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use ambulance_db_memory::InMemoryStore;
//! use ambulance_storage::DocumentStore;
//!
//! let store = InMemoryStore::new("ambulance");
//! let created = store.create("a1", &ambulance).await?;
//! ```

pub mod factory;
pub mod storage;
mod store_impl;

// Re-export the DocumentStore trait for convenience
pub use ambulance_storage::{DocumentStore, DynDocumentStore, StorageError, StoredDocument};

pub use factory::{StorageBackend, StorageConfig, StorageOptions, create_store};
pub use storage::InMemoryStore;


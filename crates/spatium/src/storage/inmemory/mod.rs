//! In-memory attribute store for development and testing.
//!
//! Behaves like the managed store from the repository's point of view:
//! tables must be created before use, scans walk the whole table in key
//! order and return the last evaluated key as the continuation cursor.
//! Data is not persisted and is lost when the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use spatium::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new(100).with_table("Post", "id");
//! ```

mod store;

pub use store::InMemoryStore;

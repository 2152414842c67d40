//! Typed entity mapping and paginated scans over an attribute store.
//!
//! The core performs no I/O: [`storage::Repository`] builds request
//! descriptors, a [`storage::StoreClient`] executes them, and
//! [`storage::PaginatedScanner`] stitches scan pages into one stream.

pub mod model;
pub mod storage;

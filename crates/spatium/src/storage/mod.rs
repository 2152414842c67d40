//! Store client implementations.
//!
//! This module provides concrete implementations of the store traits defined
//! in `spatium_core::storage`. The backend is selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-process attribute store, run on the worker pool
//! - `dynamodb`: AWS DynamoDB using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p spatium
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p spatium --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p spatium --features inmemory"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "inmemory")]
pub mod pooled;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

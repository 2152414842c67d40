//! DynamoDB storage backend implementation.
//!
//! Executes the request descriptors built by `spatium_core::storage::Repository`
//! as `PutItem`, `GetItem` and `Scan` calls using `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;

//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between SDK attribute values and the
//! store-agnostic [`AttributeValue`]. Testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use spatium_core::storage::{AttributeMap, AttributeValue};

/// Convert a core attribute value to its SDK form.
pub fn to_sdk_value(value: AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s),
        AttributeValue::N(n) => SdkValue::N(n),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b)),
        AttributeValue::Bool(b) => SdkValue::Bool(b),
        AttributeValue::Null => SdkValue::Null(true),
    }
}

/// Convert an SDK attribute value to the core form.
///
/// Returns `None` for document and set types, which have no scalar form.
pub fn from_sdk_value(value: SdkValue) -> Option<AttributeValue> {
    match value {
        SdkValue::S(s) => Some(AttributeValue::S(s)),
        SdkValue::N(n) => Some(AttributeValue::N(n)),
        SdkValue::B(b) => Some(AttributeValue::B(b.into_inner())),
        SdkValue::Bool(b) => Some(AttributeValue::Bool(b)),
        SdkValue::Null(_) => Some(AttributeValue::Null),
        _ => None,
    }
}

/// Convert a core item to a DynamoDB item.
pub fn to_sdk_item(item: AttributeMap) -> HashMap<String, SdkValue> {
    item.into_iter()
        .map(|(name, value)| (name, to_sdk_value(value)))
        .collect()
}

/// Convert a DynamoDB item to a core item.
///
/// Attributes without a scalar form are dropped; the codec treats them like
/// absent fields.
pub fn from_sdk_item(item: HashMap<String, SdkValue>) -> AttributeMap {
    item.into_iter()
        .filter_map(|(name, value)| match from_sdk_value(value) {
            Some(value) => Some((name, value)),
            None => {
                tracing::warn!(attribute = %name, "Dropping non-scalar attribute");
                None
            }
        })
        .collect()
}

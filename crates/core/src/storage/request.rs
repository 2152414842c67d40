//! Store-agnostic request descriptors.
//!
//! Repositories build these; a [`StoreClient`](super::StoreClient) executes them.

use std::collections::HashMap;

use super::{AttributeMap, AttributeValue};

/// Placeholder name used for the filtered attribute in rendered expressions.
pub const FILTER_NAME_PLACEHOLDER: &str = "#f";
/// Placeholder used for the compared value in rendered expressions.
pub const FILTER_VALUE_PLACEHOLDER: &str = ":val";

/// A single-field equality predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: AttributeValue,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Opaque continuation token returned by a scan that has more results.
///
/// Wraps the key of the last evaluated item, which is what the managed store
/// hands back. Callers should only compare and resubmit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCursor(AttributeMap);

impl ScanCursor {
    pub fn new(last_key: AttributeMap) -> Self {
        Self(last_key)
    }

    pub fn as_map(&self) -> &AttributeMap {
        &self.0
    }

    pub fn into_map(self) -> AttributeMap {
        self.0
    }
}

/// Write an entire item to a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PutRequest {
    pub table_name: String,
    pub item: AttributeMap,
}

/// Fetch one item by its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct GetRequest {
    pub table_name: String,
    pub key: AttributeMap,
}

/// One bounded page of a full-table scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub table_name: String,
    pub filter: Option<Filter>,
    pub exclusive_start: Option<ScanCursor>,
    pub limit: Option<u32>,
}

impl ScanRequest {
    /// Renders the filter as an expression with placeholder maps.
    ///
    /// Returns `(expression, names, values)`, e.g. `("#f = :val", {"#f": "postId"},
    /// {":val": S("p1")})`. `None` when the scan is unfiltered.
    pub fn filter_expression(
        &self,
    ) -> Option<(
        String,
        HashMap<String, String>,
        HashMap<String, AttributeValue>,
    )> {
        self.filter.as_ref().map(|filter| {
            let expression = format!("{FILTER_NAME_PLACEHOLDER} = {FILTER_VALUE_PLACEHOLDER}");
            let names =
                HashMap::from([(FILTER_NAME_PLACEHOLDER.to_string(), filter.field.clone())]);
            let values =
                HashMap::from([(FILTER_VALUE_PLACEHOLDER.to_string(), filter.value.clone())]);
            (expression, names, values)
        })
    }
}

/// A page of raw items returned by a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<AttributeMap>,
    /// Present when more results may exist.
    pub cursor: Option<ScanCursor>,
}

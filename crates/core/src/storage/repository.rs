//! Generic repository bound to one entity type.
//!
//! A repository performs no I/O. It turns entity state and filters into
//! request descriptors and decodes raw items back into entities.

use super::{
    AttributeCodec, AttributeMap, AttributeValue, Entity, Filter, GetRequest, PutRequest,
    RepositoryError, Result, ScanCursor, ScanRequest, TableSchema,
};

/// Table identity plus request builders for entity type `T`.
///
/// Immutable after construction; share it by reference across tasks.
#[derive(Debug, Clone)]
pub struct Repository<T> {
    codec: AttributeCodec<T>,
    page_size: Option<u32>,
}

impl<T: Entity> Repository<T> {
    /// Creates a repository for `T` using its declared table name.
    pub fn new() -> Result<Self> {
        Ok(Self::with_schema(TableSchema::of::<T>()?))
    }

    /// Creates a repository whose physical table name is prefixed,
    /// e.g. `dev-` + `Post`.
    pub fn with_table_prefix(prefix: &str) -> Result<Self> {
        let schema = TableSchema::of::<T>()?;
        let table_name = format!("{prefix}{}", schema.table_name());
        Ok(Self::with_schema(schema.with_table_name(table_name)))
    }

    fn with_schema(schema: TableSchema) -> Self {
        Self {
            codec: AttributeCodec::new(schema),
            page_size: None,
        }
    }

    /// Sets the page-size hint sent with every scan request. Stores reject
    /// a zero limit, so the hint is at least 1.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn schema(&self) -> &TableSchema {
        self.codec.schema()
    }

    pub fn table_name(&self) -> &str {
        self.schema().table_name()
    }

    pub fn key_field(&self) -> &'static str {
        self.schema().key_field()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.schema().columns()
    }

    /// Builds a put descriptor. Fails before submission if the key is empty
    /// or any field cannot be encoded, so a put is never partial.
    pub fn build_put(&self, entity: &T) -> Result<PutRequest> {
        if entity.key_value().is_empty() {
            return Err(RepositoryError::encoding(
                self.key_field(),
                "key field is empty",
            ));
        }

        let item = self.codec.encode(entity)?;
        Ok(PutRequest {
            table_name: self.table_name().to_string(),
            item,
        })
    }

    /// Builds a get-by-key descriptor.
    pub fn build_get(&self, key: impl Into<AttributeValue>) -> GetRequest {
        GetRequest {
            table_name: self.table_name().to_string(),
            key: AttributeMap::from([(self.key_field().to_string(), key.into())]),
        }
    }

    /// Builds one page of a full-table scan restricted by an equality filter.
    ///
    /// This is a scan, not an index lookup: cost grows with table size.
    pub fn build_scan(&self, filter: &Filter, cursor: Option<ScanCursor>) -> Result<ScanRequest> {
        if !self.schema().has_column(&filter.field) {
            return Err(RepositoryError::Schema(format!(
                "field '{}' is not a column of table '{}'",
                filter.field,
                self.table_name()
            )));
        }
        Ok(self.scan_request(Some(filter.clone()), cursor))
    }

    /// Builds one page of an unfiltered full-table scan.
    pub fn build_full_scan(&self, cursor: Option<ScanCursor>) -> ScanRequest {
        self.scan_request(None, cursor)
    }

    fn scan_request(&self, filter: Option<Filter>, cursor: Option<ScanCursor>) -> ScanRequest {
        ScanRequest {
            table_name: self.table_name().to_string(),
            filter,
            exclusive_start: cursor,
            limit: self.page_size,
        }
    }

    pub fn decode(&self, item: &AttributeMap) -> Result<T> {
        self.codec.decode(item)
    }
}

mod attribute;
mod codec;
mod error;
mod http_mapping;
mod repository;
mod request;
mod scanner;
mod schema;
mod traits;

pub use attribute::{AttributeMap, AttributeValue};
pub use codec::{AttributeCodec, RECORD_FIELD};
pub use error::{RepositoryError, Result, StoreError};
pub use http_mapping::repository_error_to_status_code;
pub use repository::Repository;
pub use request::{
    Filter, GetRequest, PutRequest, ScanCursor, ScanPage, ScanRequest, FILTER_NAME_PLACEHOLDER,
    FILTER_VALUE_PLACEHOLDER,
};
pub use scanner::{collect_all, PaginatedScanner};
pub use schema::{Entity, FieldDef, FieldKind, TableSchema};
pub use traits::{BlockingStoreClient, StoreClient};

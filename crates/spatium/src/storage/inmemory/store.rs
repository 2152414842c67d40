use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use spatium_core::storage::{
    AttributeMap, AttributeValue, BlockingStoreClient, Filter, GetRequest, PutRequest,
    ScanCursor, ScanPage, ScanRequest, StoreError,
};

/// Items of one table, ordered by rendered key.
#[derive(Debug)]
struct Table {
    key_field: String,
    items: BTreeMap<String, AttributeMap>,
}

/// In-memory storage backend.
///
/// Calls block on an `RwLock`, so the store is exposed through
/// [`BlockingStoreClient`] and meant to run on a worker pool.
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Table>>,
    page_size: usize,
}

impl InMemoryStore {
    /// Creates an empty store whose scans evaluate at most `page_size`
    /// items per call unless the request carries its own limit.
    pub fn new(page_size: usize) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
        }
    }

    /// Creates a table keyed by `key_field`. Existing tables are kept.
    pub fn with_table(self, name: impl Into<String>, key_field: impl Into<String>) -> Self {
        self.create_table(name, key_field);
        self
    }

    pub fn create_table(&self, name: impl Into<String>, key_field: impl Into<String>) {
        let name = name.into();
        let key_field = key_field.into();
        if let Ok(mut tables) = self.tables.write() {
            tables.entry(name.clone()).or_insert_with(|| {
                tracing::debug!(table = %name, key_field = %key_field, "Created in-memory table");
                Table {
                    key_field,
                    items: BTreeMap::new(),
                }
            });
        }
    }

    /// Number of items currently stored in `table`.
    pub fn item_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .ok()
            .and_then(|tables| tables.get(table).map(|t| t.items.len()))
            .unwrap_or(0)
    }
}

impl BlockingStoreClient for InMemoryStore {
    fn put(&self, request: PutRequest) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        let table = tables
            .get_mut(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;

        let key = request
            .item
            .get(&table.key_field)
            .ok_or_else(|| {
                StoreError::Service(format!(
                    "item is missing key attribute '{}'",
                    table.key_field
                ))
            })
            .and_then(render_key)?;

        table.items.insert(key, request.item);
        Ok(())
    }

    fn get(&self, request: GetRequest) -> Result<Option<AttributeMap>, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;

        let key = request
            .key
            .get(&table.key_field)
            .ok_or_else(|| {
                StoreError::Service(format!(
                    "key does not name attribute '{}'",
                    table.key_field
                ))
            })
            .and_then(render_key)?;

        Ok(table.items.get(&key).cloned())
    }

    fn scan(&self, request: ScanRequest) -> Result<ScanPage, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let table = tables
            .get(&request.table_name)
            .ok_or_else(|| StoreError::TableNotFound(request.table_name.clone()))?;

        let start = match &request.exclusive_start {
            Some(cursor) => {
                let key = cursor
                    .as_map()
                    .get(&table.key_field)
                    .ok_or_else(|| StoreError::Service("malformed exclusive start key".to_string()))
                    .and_then(render_key)?;
                Bound::Excluded(key)
            }
            None => Bound::Unbounded,
        };

        let limit = request
            .limit
            .map(|limit| limit as usize)
            .unwrap_or(self.page_size)
            .max(1);

        // Limit counts evaluated items, matched or not.
        let mut remaining = table.items.range((start, Bound::Unbounded)).peekable();
        let mut items = Vec::new();
        let mut last_evaluated = None;
        let mut evaluated = 0;

        while evaluated < limit {
            let Some((_, item)) = remaining.next() else {
                break;
            };
            evaluated += 1;
            last_evaluated = item.get(&table.key_field).cloned();

            if matches_filter(request.filter.as_ref(), item) {
                items.push(item.clone());
            }
        }

        let cursor = match (remaining.peek(), last_evaluated) {
            (Some(_), Some(key)) => Some(ScanCursor::new(AttributeMap::from([(
                table.key_field.clone(),
                key,
            )]))),
            _ => None,
        };

        Ok(ScanPage { items, cursor })
    }
}

fn matches_filter(filter: Option<&Filter>, item: &AttributeMap) -> bool {
    match filter {
        Some(filter) => item.get(&filter.field) == Some(&filter.value),
        None => true,
    }
}

/// Keys are ordered by tag, then by text; only string and number keys are
/// allowed. The tag keeps `S("1")` and `N("1")` apart.
fn render_key(value: &AttributeValue) -> Result<String, StoreError> {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => Ok(format!("{}:{s}", value.type_name())),
        other => Err(StoreError::Service(format!(
            "unsupported key type {}",
            other.type_name()
        ))),
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

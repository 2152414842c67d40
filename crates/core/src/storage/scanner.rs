//! Exhaustive iteration over paginated scans.
//!
//! Pages are requested strictly one after another, since every request needs
//! the cursor of the page before it. Entities are yielded lazily as pages
//! arrive; dropping the stream stops further requests.

use std::sync::Arc;

use async_stream::try_stream;
use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt};

use super::{Entity, Filter, Repository, RepositoryError, Result, ScanCursor, StoreClient};

/// Drives repeated scan calls until the store stops returning a cursor.
#[derive(Clone)]
pub struct PaginatedScanner {
    store: Arc<dyn StoreClient>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl PaginatedScanner {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self {
            store,
            shutdown: None,
        }
    }

    /// Stops open scans before their next page once the flag turns `true`.
    ///
    /// The page in flight when the flag flips is still yielded in full.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Lazily yields every entity matching `filter`, page by page.
    ///
    /// Fails up front with a schema error if the filter names an unknown field.
    pub fn scan_all<'a, T: Entity>(
        &'a self,
        repo: &'a Repository<T>,
        filter: Filter,
    ) -> Result<impl Stream<Item = Result<T>> + Send + 'a> {
        repo.build_scan(&filter, None)?;
        Ok(self.pages(repo, Some(filter)))
    }

    /// Lazily yields every entity in the table.
    pub fn scan_table<'a, T: Entity>(
        &'a self,
        repo: &'a Repository<T>,
    ) -> impl Stream<Item = Result<T>> + Send + 'a {
        self.pages(repo, None)
    }

    fn pages<'a, T: Entity>(
        &'a self,
        repo: &'a Repository<T>,
        filter: Option<Filter>,
    ) -> impl Stream<Item = Result<T>> + Send + 'a {
        try_stream! {
            let mut cursor: Option<ScanCursor> = None;
            let mut page_number: u32 = 0;

            loop {
                if page_number > 0 && self.is_shut_down() {
                    tracing::debug!(table = repo.table_name(), page_number, "Scan stopped by shutdown");
                    break;
                }

                let request = match &filter {
                    Some(filter) => repo.build_scan(filter, cursor.clone())?,
                    None => repo.build_full_scan(cursor.clone()),
                };
                page_number += 1;

                let page = self
                    .store
                    .scan(request)
                    .await
                    .map_err(RepositoryError::from)?;

                tracing::debug!(
                    table = repo.table_name(),
                    page_number,
                    items = page.items.len(),
                    has_more = page.cursor.is_some(),
                    "Scanned page"
                );

                check_progress(cursor.as_ref(), page.cursor.as_ref())?;

                for item in &page.items {
                    let entity = repo.decode(item)?;
                    yield entity;
                }

                match page.cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }
        }
    }

    fn is_shut_down(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}

/// A page must not hand back the cursor it was requested with.
fn check_progress(submitted: Option<&ScanCursor>, returned: Option<&ScanCursor>) -> Result<()> {
    match (submitted, returned) {
        (Some(submitted), Some(returned)) if submitted == returned => Err(
            RepositoryError::Protocol("store returned the cursor it was given".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Drains a scan stream into a vector, stopping at the first error.
pub async fn collect_all<T>(stream: impl Stream<Item = Result<T>>) -> Result<Vec<T>> {
    tokio::pin!(stream);
    let mut entities = Vec::new();
    while let Some(entity) = stream.next().await {
        entities.push(entity?);
    }
    Ok(entities)
}

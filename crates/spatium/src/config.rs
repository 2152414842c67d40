use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads for blocking store calls (default: available parallelism)
    pub worker_count: usize,
    /// Pending jobs each worker queues before backpressure (default: 64)
    pub worker_queue_depth: usize,
    /// Items evaluated per scan page (default: 100)
    pub scan_page_size: u32,
    /// Prefix applied to every table name (default: "")
    pub table_prefix: String,
    /// Seed demo posts on startup (default: true)
    /// Note: Only used with the `inmemory` backend.
    #[allow(dead_code)]
    pub seed_demo_data: bool,
    /// DynamoDB endpoint override, e.g. DynamoDB Local (default: none)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WORKER_COUNT` - Worker threads (default: available parallelism)
    /// - `WORKER_QUEUE_DEPTH` - Queue depth per worker (default: 64)
    /// - `SCAN_PAGE_SIZE` - Items per scan page (default: 100)
    /// - `TABLE_PREFIX` - Table name prefix (default: "")
    /// - `SEED_DEMO_DATA` - Seed demo data, `true`/`false` (default: true)
    /// - `DYNAMODB_ENDPOINT` - DynamoDB endpoint override (default: none)
    pub fn from_env() -> Self {
        Self {
            worker_count: env::var("WORKER_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_worker_count),
            worker_queue_depth: env::var("WORKER_QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            scan_page_size: parse_page_size(env::var("SCAN_PAGE_SIZE").ok().as_deref()),
            table_prefix: env::var("TABLE_PREFIX").unwrap_or_default(),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
        }
    }
}

/// Stores reject a zero scan limit; zero and unparsable values use the default.
fn parse_page_size(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.parse().ok())
        .filter(|size| *size > 0)
        .unwrap_or(100)
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

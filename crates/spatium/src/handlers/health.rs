//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Worker pool stats (passive, no store call)

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Worker pool stats.
///
/// Backends that call the store directly report no pool.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.pool.as_ref().map(|pool| pool.stats());
    Json(serde_json::json!({
        "status": "ok",
        "pool": pool,
    }))
}

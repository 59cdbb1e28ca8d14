/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0",
///   "database": { "reachable": true, "latency_ms": 2 }
/// }
/// ```
///
/// Always answers 200. Load balancers that should stop routing on a
/// database outage key off `status` ("ok" or "degraded"), not the HTTP
/// code, so a human probing the endpoint still gets the diagnostic body.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every dependency answered, "degraded" otherwise
    pub status: String,

    /// Application version
    pub version: String,

    /// Database reachability probe
    pub database: DatabaseHealth,
}

/// Result of the database probe
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// Whether the round trip succeeded
    pub reachable: bool,

    /// Round-trip time of the probe query, absent when it failed
    pub latency_ms: Option<u64>,
}

/// Health check handler, public
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let database = match minkan_shared::db::health_check(&state.db).await {
        Ok(()) => DatabaseHealth {
            reachable: true,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(_) => DatabaseHealth {
            reachable: false,
            latency_ms: None,
        },
    };

    let status = if database.reachable { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use core_kernel::AdapterHealth;

use crate::{error::ApiError, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub store: AdapterHealth,
    pub latency_ms: u64,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the customer store)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let health = state.service.store().health_check().await;

    if !health.status.is_operational() {
        warn!(adapter = %health.adapter_id, message = ?health.message, "Store not ready");
        return Err(ApiError::ServiceUnavailable(
            health
                .message
                .unwrap_or_else(|| format!("{} is unhealthy", health.adapter_id)),
        ));
    }

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: health.status,
        latency_ms: health.latency_ms,
    }))
}

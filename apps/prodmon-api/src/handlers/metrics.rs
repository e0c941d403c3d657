//! 指标快照
//!
//! - GET /metrics
//! - GET /health

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prodmon_telemetry::metrics;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            service_requests: snapshot.service_requests,
            service_failures: snapshot.service_failures,
            store_errors: snapshot.store_errors,
            grid_rows_built: snapshot.grid_rows_built,
        })),
    )
        .into_response()
}

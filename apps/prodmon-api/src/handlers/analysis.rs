//! 举升分析 handlers
//!
//! - POST /api/analysis/rod-lift - 功图分析（缺省日期取最新功图）
//! - POST /api/analysis/esp - 电潜泵分析
//! - POST /api/analysis/gas-lift - 气举分析

use crate::AppState;
use crate::middleware::CorrelationId;
use crate::utils::response::service_response;
use api_contract::AnalysisInput;
use axum::{Extension, Json, extract::State, response::Response};
use domain::WithCorrelationId;

pub async fn get_rod_lift_analysis(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<AnalysisInput>,
) -> Response {
    let result = state
        .rod_lift
        .get_card_date_analysis(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

pub async fn get_esp_analysis(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<AnalysisInput>,
) -> Response {
    let result = state
        .esp
        .get_esp_analysis(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

pub async fn get_gas_lift_analysis(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<AnalysisInput>,
) -> Response {
    let result = state
        .gas_lift
        .get_gas_lift_analysis(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

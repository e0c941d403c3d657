//! 趋势 handlers
//!
//! - POST /api/trends/items - 可绘制的数据项
//! - POST /api/trends/data - 指定时间窗口内的趋势点

use crate::AppState;
use crate::middleware::CorrelationId;
use crate::utils::response::service_response;
use api_contract::{TrendDataInput, TrendItemsInput};
use axum::{Extension, Json, extract::State, response::Response};
use domain::WithCorrelationId;

pub async fn list_trend_items(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<TrendItemsInput>,
) -> Response {
    let result = state
        .trend
        .get_trend_items(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

pub async fn get_trend_data(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<TrendDataInput>,
) -> Response {
    let result = state
        .trend
        .get_trend_data(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

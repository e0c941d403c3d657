//! 单井状态 handlers
//!
//! - POST /api/asset-status

use crate::AppState;
use crate::middleware::CorrelationId;
use crate::utils::response::service_response;
use api_contract::AssetStatusInput;
use axum::{Extension, Json, extract::State, response::Response};
use domain::WithCorrelationId;

pub async fn get_asset_status(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<AssetStatusInput>,
) -> Response {
    let result = state
        .asset_status
        .get_asset_status(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

//! 分组状态 handlers
//!
//! - POST /api/group-status/views - 用户可见视图
//! - POST /api/group-status - 分组状态表格
//! - POST /api/group-status/downtime - 分组停机统计

use crate::AppState;
use crate::middleware::CorrelationId;
use crate::utils::response::service_response;
use api_contract::{GroupDowntimeInput, GroupStatusInput, GroupStatusViewsInput};
use axum::{Extension, Json, extract::State, response::Response};
use domain::WithCorrelationId;

pub async fn list_group_views(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<GroupStatusViewsInput>,
) -> Response {
    let result = state
        .group_status
        .get_views(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

pub async fn get_group_status(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<GroupStatusInput>,
) -> Response {
    let result = state
        .group_status
        .get_group_status(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

pub async fn get_group_downtime(
    State(state): State<AppState>,
    Extension(CorrelationId(correlation_id)): Extension<CorrelationId>,
    Json(input): Json<GroupDowntimeInput>,
) -> Response {
    let result = state
        .group_status
        .get_group_downtime(WithCorrelationId::new(correlation_id, input))
        .await;
    service_response(result)
}

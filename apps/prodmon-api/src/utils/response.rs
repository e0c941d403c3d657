//! HTTP 响应辅助函数
//!
//! 服务层统一返回 `ServiceResult`，此处转换为 `ApiResponse`：
//! - 成功：200 + data
//! - 失败：400 + `REQUEST.FAILED` 错误码与服务层消息

use api_contract::{ApiResponse, ServiceResult};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const REQUEST_FAILED: &str = "REQUEST.FAILED";

/// ServiceResult 转 HTTP 响应
pub fn service_response<T: Serialize>(result: ServiceResult<T>) -> Response {
    match (result.status, result.value) {
        (true, Some(value)) => (StatusCode::OK, Json(ApiResponse::success(value))).into_response(),
        (true, None) => internal_error("missing result value"),
        (false, _) => bad_request_error(result.message.unwrap_or_default()),
    }
}

/// 请求失败响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(REQUEST_FAILED, message.into())),
    )
        .into_response()
}

/// 内部错误响应
pub fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message.into())),
    )
        .into_response()
}

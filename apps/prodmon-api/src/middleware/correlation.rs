//! correlation id 中间件
//!
//! - 请求头携带 `x-correlation-id` 时沿用，否则生成新的 UUID
//! - 写入请求扩展供 handlers 读取，并回写到响应头
//! - 为整个请求创建 tracing span

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use prodmon_telemetry::new_correlation_id;
use tracing::{Instrument, info_span};

pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// 当前请求的 correlation id。
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

/// 请求上下文中间件：注入 correlation id
pub async fn correlation_context(mut req: Request<Body>, next: Next) -> Response {
    let correlation_id =
        incoming_correlation_id(req.headers()).unwrap_or_else(new_correlation_id);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut()
        .insert(CorrelationId(correlation_id.clone()));

    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        CORRELATION_HEADER,
        HeaderValue::from_str(&correlation_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 读取调用方提供的 correlation id（空白视为未提供）
pub fn incoming_correlation_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CORRELATION_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

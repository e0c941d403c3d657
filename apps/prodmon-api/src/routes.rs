//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查与指标：/health, /metrics
//! - 单井状态：/api/asset-status
//! - 举升分析：/api/analysis/{rod-lift,esp,gas-lift}
//! - 分组状态：/api/group-status, /api/group-status/views, /api/group-status/downtime
//! - 趋势：/api/trends/items, /api/trends/data

use super::AppState;
use super::handlers::*;
use crate::middleware::correlation_context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/asset-status", post(get_asset_status))
        .route("/analysis/rod-lift", post(get_rod_lift_analysis))
        .route("/analysis/esp", post(get_esp_analysis))
        .route("/analysis/gas-lift", post(get_gas_lift_analysis))
        .route("/group-status", post(get_group_status))
        .route("/group-status/views", post(list_group_views))
        .route("/group-status/downtime", post(get_group_downtime))
        .route("/trends/items", post(list_trend_items))
        .route("/trends/data", post(get_trend_data))
}

/// 完整应用：业务路由挂在 /api 下，外层注入 correlation id 与请求追踪
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(middleware::from_fn(correlation_context))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::CORRELATION_HEADER;
    use crate::{InMemoryStores, seed};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain::UnitSystem;
    use http_body_util::BodyExt;
    use prodmon_config::AppConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> Router {
        let config = AppConfig {
            http_addr: "127.0.0.1:0".to_string(),
            default_locale: "en".to_string(),
            default_unit_system: UnitSystem::Imperial,
            downtime_days: 7,
            gas_lift_min_injection_mcfd: 50.0,
            seed_demo: true,
        };
        let stores = InMemoryStores::new();
        seed::seed_demo(&stores).expect("seed");
        build_app(AppState::build(&config, &stores))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app().oneshot(request).await.expect("response");
        let status = response.status();
        let correlation_id = response
            .headers()
            .get(CORRELATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, correlation_id, body)
    }

    fn post(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .header(CORRELATION_HEADER, "corr-api")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn health_generates_correlation_id() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request");
        let (status, correlation_id, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        let correlation_id = correlation_id.expect("header");
        assert!(Uuid::parse_str(&correlation_id).is_ok());
    }

    #[tokio::test]
    async fn asset_status_for_seeded_well() {
        let (status, correlation_id, body) = send(post(
            "/api/asset-status",
            json!({
                "assetId": Uuid::from_u128(0x101).to_string(),
                "customerId": seed::DEMO_CUSTOMER_ID.to_string(),
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(correlation_id.as_deref(), Some("corr-api"));
        assert_eq!(body["success"], json!(true));
    }

    #[tokio::test]
    async fn failure_results_map_to_bad_request() {
        let (status, _, body) = send(post("/api/asset-status", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("REQUEST.FAILED"));
        assert_eq!(body["error"]["message"], json!("Asset id is required."));
    }

    #[tokio::test]
    async fn group_status_grid_and_downtime() {
        let (status, _, body) = send(post(
            "/api/group-status",
            json!({ "viewId": seed::DEMO_VIEW, "groupName": seed::DEMO_GROUP }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["data"]["columns"].as_array().map(Vec::len), Some(10));

        let (status, _, body) = send(post(
            "/api/group-status/downtime",
            json!({ "groupName": seed::DEMO_GROUP }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalAssets"], json!(3));
        assert_eq!(body["data"]["dayCount"], json!(7));
    }

    #[tokio::test]
    async fn gas_lift_analysis_and_trend_items() {
        let (status, _, body) = send(post(
            "/api/analysis/gas-lift",
            json!({
                "assetId": Uuid::from_u128(0x301).to_string(),
                "customerId": seed::DEMO_CUSTOMER_ID.to_string(),
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let (status, _, body) = send(post(
            "/api/trends/items",
            json!({
                "assetId": Uuid::from_u128(0x201).to_string(),
                "customerId": seed::DEMO_CUSTOMER_ID.to_string(),
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn metrics_snapshot() {
        let request = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .expect("request");
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["serviceRequests"].is_u64());
    }
}

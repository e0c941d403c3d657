//! 趋势数据 DTO。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 趋势项列表请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItemsInput {
    #[serde(default)]
    pub asset_id: Uuid,
    #[serde(default)]
    pub customer_id: Uuid,
    pub user_id: Option<String>,
}

/// 趋势数据请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataInput {
    #[serde(default)]
    pub asset_id: Uuid,
    #[serde(default)]
    pub customer_id: Uuid,
    #[serde(default)]
    pub item_key: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub user_id: Option<String>,
}

/// 趋势项。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItemDto {
    pub key: String,
    pub name: String,
    pub unit: String,
}

/// 趋势点。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointDto {
    pub timestamp: String,
    pub ts_ms: i64,
    pub value: f64,
}

/// 趋势数据视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataView {
    pub asset_id: String,
    pub key: String,
    pub name: String,
    pub unit: String,
    pub points: Vec<TrendPointDto>,
}

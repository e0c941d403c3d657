//! 分组状态表格与停机统计 DTO。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 可用视图列表请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusViewsInput {
    #[serde(default)]
    pub user_id: String,
}

/// 分组状态表格请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusInput {
    #[serde(default)]
    pub view_id: String,
    #[serde(default)]
    pub group_name: String,
    pub user_id: Option<String>,
}

/// 分组停机统计请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDowntimeInput {
    #[serde(default)]
    pub group_name: String,
    pub day_count: Option<i64>,
    pub end_ms: Option<i64>,
    pub user_id: Option<String>,
}

/// 视图条目。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusViewDto {
    pub view_id: String,
    pub name: String,
    pub is_global: bool,
}

/// 表格列。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusColumnDto {
    pub column_id: String,
    pub name: String,
    pub source_type: String,
    pub position: i32,
    pub width: i32,
    pub align: String,
    pub unit: String,
}

/// 单元格。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDto {
    pub value: Option<f64>,
    pub text: String,
    pub back_color: Option<String>,
    pub fore_color: Option<String>,
    pub classification: Option<String>,
}

/// 表格行（按列 id 索引单元格）。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusRowDto {
    pub node_id: String,
    pub asset_id: String,
    pub cells: BTreeMap<String, CellDto>,
}

/// 运行状态计数。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatusCountDto {
    pub status: String,
    pub count: usize,
    pub percent: f64,
}

/// 运行状态汇总。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatusSummaryDto {
    pub total: usize,
    pub items: Vec<RunStatusCountDto>,
}

/// 分组状态表格视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatusView {
    pub view_id: String,
    pub view_name: String,
    pub group_name: String,
    pub columns: Vec<GroupStatusColumnDto>,
    pub rows: Vec<GroupStatusRowDto>,
    pub run_status_summary: RunStatusSummaryDto,
}

/// 停机分桶。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeBucketDto {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// 按举升方式的停机分桶。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDowntimeDto {
    pub application: String,
    pub asset_count: usize,
    pub buckets: Vec<DowntimeBucketDto>,
}

/// 单井停机统计。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDowntimeDto {
    pub node_id: String,
    pub asset_id: String,
    pub application: String,
    pub source: String,
    pub downtime_hours: f64,
    pub days_with_data: usize,
}

/// 分组停机统计视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDowntimeView {
    pub group_name: String,
    pub day_count: i64,
    pub start: String,
    pub end: String,
    pub total_assets: usize,
    pub buckets: Vec<DowntimeBucketDto>,
    pub by_application: Vec<ApplicationDowntimeDto>,
    pub assets: Vec<AssetDowntimeDto>,
}

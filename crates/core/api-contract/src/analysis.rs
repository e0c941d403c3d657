//! 分析结果 DTO（有杆泵 / 电潜泵 / 气举）。

use crate::PropertyValueDto;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 分析结果查询请求体（`dateMs` 缺省时取最新一次分析）。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    #[serde(default)]
    pub asset_id: Uuid,
    #[serde(default)]
    pub customer_id: Uuid,
    #[serde(alias = "cardDateMs", alias = "testDateMs")]
    pub date_ms: Option<i64>,
    pub user_id: Option<String>,
}

/// 有杆泵功图分析视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RodLiftAnalysisView {
    pub asset_id: String,
    pub well_name: String,
    pub card_date: String,
    pub inputs: Vec<PropertyValueDto>,
    pub outputs: Vec<PropertyValueDto>,
    pub loading: Vec<PropertyValueDto>,
    pub pump_condition: String,
}

/// 电潜泵分析视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EspAnalysisView {
    pub asset_id: String,
    pub well_name: String,
    pub test_date: String,
    pub pump_name: Option<String>,
    pub values: Vec<PropertyValueDto>,
    pub operating_region: String,
}

/// 气举阀条目。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasLiftValveDto {
    pub number: u32,
    pub depth: String,
    pub port_size: String,
    pub opening_pressure: String,
    pub state: String,
}

/// 气举分析视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasLiftAnalysisView {
    pub asset_id: String,
    pub well_name: String,
    pub test_date: String,
    pub values: Vec<PropertyValueDto>,
    pub valves: Vec<GasLiftValveDto>,
    pub injecting_valve: Option<u32>,
    pub injecting_at_deepest_valve: bool,
}

//! 单井状态 DTO。

use crate::PropertyValueDto;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 单井状态查询请求体。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusInput {
    #[serde(default)]
    pub asset_id: Uuid,
    #[serde(default)]
    pub customer_id: Uuid,
    pub user_id: Option<String>,
}

/// 报警条目。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmDto {
    pub address: i32,
    pub description: String,
    pub priority: i32,
    pub state: String,
    pub raised_at: Option<String>,
}

/// 异常条目。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDto {
    pub description: String,
    pub priority: i32,
}

/// 单井状态视图。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusView {
    pub asset_id: String,
    pub node_id: String,
    pub well_name: String,
    pub application: String,
    pub enabled: String,
    pub run_status: Option<String>,
    pub comm_status: Option<String>,
    pub last_good_scan: Option<String>,
    pub time_in_state: Option<String>,
    pub today_runtime: Option<String>,
    pub yesterday_runtime: Option<String>,
    pub operational_score: Option<String>,
    pub status_registers: Vec<PropertyValueDto>,
    pub alarms: Vec<AlarmDto>,
    pub exceptions: Vec<ExceptionDto>,
}

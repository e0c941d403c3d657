//! 稳定的 DTO 与服务/API 响应契约。

pub mod analysis;
pub mod asset_status;
pub mod group_status;
pub mod trend;

pub use analysis::*;
pub use asset_status::*;
pub use group_status::*;
pub use trend::*;

use serde::Serialize;

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 服务层返回封装：状态 + 消息 + 结果，按 correlation id 关联。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    pub status: bool,
    pub message: Option<String>,
    pub correlation_id: String,
    pub value: Option<T>,
}

impl<T> ServiceResult<T> {
    pub fn success(correlation_id: impl Into<String>, value: T) -> Self {
        Self {
            status: true,
            message: None,
            correlation_id: correlation_id.into(),
            value: Some(value),
        }
    }

    pub fn failure(correlation_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
            correlation_id: correlation_id.into(),
            value: None,
        }
    }
}

/// 带展示文本的属性值（状态寄存器、分析结果字段通用）。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValueDto {
    pub id: String,
    pub label: String,
    pub value: Option<f64>,
    pub display_value: String,
    pub unit: String,
}

/// 指标快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub service_requests: u64,
    pub service_failures: u64,
    pub store_errors: u64,
    pub grid_rows_built: u64,
}

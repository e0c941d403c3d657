//! 分组状态表格构建与停机统计。
//!
//! - `service`：视图列表、表格构建、停机统计入口
//! - `columns`：公共字段与列格式化器工厂
//! - `formula`：公式列表达式
//! - `conditional`：列条件格式
//! - `downtime`：停机小时数与区间计数

pub mod columns;
pub mod conditional;
pub mod downtime;
pub mod formula;
pub mod service;

pub use columns::{ColumnFormatter, ColumnFormatterFactory, CommonField, RawValue};
pub use downtime::{DowntimeBucket, DowntimeConfig};
pub use formula::{Formula, FormulaError};
pub use service::{
    CORRELATION_REQUIRED, DAY_COUNT_INVALID, GROUP_NAME_REQUIRED, GroupStatusError,
    GroupStatusProcessingService, LOOKUP_FAILED, PAYLOAD_REQUIRED, VIEW_ID_REQUIRED,
    VIEW_NOT_FOUND,
};

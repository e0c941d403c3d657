//! 举升分析结果格式化服务（有杆泵 / 电潜泵 / 气举）。
//!
//! 三个服务共享 [`AnalysisDeps`]：先按客户校验资产，再读取指定日期
//! （缺省为最新）的分析记录，最后按用户偏好完成短语替换与单位换算。

mod common;
pub mod esp;
pub mod gas_lift;
pub mod rod_lift;

pub use common::{
    ANALYSIS_NOT_FOUND, ASSET_ID_REQUIRED, ASSET_NOT_FOUND, AnalysisDeps, AnalysisError,
    CORRELATION_REQUIRED, LOOKUP_FAILED, PAYLOAD_REQUIRED,
};
pub use esp::{EspAnalysisService, OperatingRegion};
pub use gas_lift::GasLiftAnalysisService;
pub use rod_lift::{PumpCondition, RodLiftAnalysisService};

//! 存储接口 Trait 定义
//!
//! 定义服务层依赖的所有数据源：
//! - AssetStore：资产、扫描状态、报警、异常
//! - UserPreferenceStore：用户展示偏好
//! - LocalePhraseStore：多语言短语
//! - AnalysisStore：有杆泵 / 电潜泵 / 气举分析结果
//! - HistoricalStore：趋势项目录
//! - DataHistorySqlStore：关系库历史（老井）
//! - TimeSeriesStore：时序库历史（新井）
//! - GroupStatusStore：分组视图、列定义、各来源批量取值
//!
//! 设计原则：
//! - 所有接口显式接收 CallContext
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    AlarmRecord, AssetRecord, AssetStatusRecord, ChannelPointRecord, DailyHistoryRecord,
    DailyMetric, EspAnalysisRecord, ExceptionRecord, FacilityTagValueRecord, FormulaRecord,
    GasLiftAnalysisRecord, NodeSummaryRecord, ParamStandardValueRecord, ParameterValueRecord,
    PhraseRecord, RodLiftAnalysisRecord, TrendItemRecord, TrendPointRecord, UserPreferenceRecord,
    ViewColumnRecord, ViewRecord,
};
use async_trait::async_trait;
use domain::CallContext;
use uuid::Uuid;

/// 资产存储接口
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// 查找属于指定客户的资产
    async fn find_asset(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<AssetRecord>, StorageError>;

    /// 获取资产最新扫描状态
    async fn get_asset_status(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
    ) -> Result<Option<AssetStatusRecord>, StorageError>;

    /// 列出节点报警
    async fn list_alarms(
        &self,
        ctx: &CallContext,
        node_id: &str,
    ) -> Result<Vec<AlarmRecord>, StorageError>;

    /// 列出节点异常
    async fn list_exceptions(
        &self,
        ctx: &CallContext,
        node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError>;
}

/// 用户偏好存储接口
#[async_trait]
pub trait UserPreferenceStore: Send + Sync {
    async fn find_preferences(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<Option<UserPreferenceRecord>, StorageError>;
}

/// 多语言短语存储接口
#[async_trait]
pub trait LocalePhraseStore: Send + Sync {
    /// 按语言批量获取短语，缺失的 id 不返回
    async fn get_phrases(
        &self,
        ctx: &CallContext,
        locale: &str,
        phrase_ids: &[i32],
    ) -> Result<Vec<PhraseRecord>, StorageError>;
}

/// 分析结果存储接口
///
/// 日期为 `None` 时返回最新一次分析。
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn get_rod_lift_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        card_date_ms: Option<i64>,
    ) -> Result<Option<RodLiftAnalysisRecord>, StorageError>;

    async fn get_esp_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        test_date_ms: Option<i64>,
    ) -> Result<Option<EspAnalysisRecord>, StorageError>;

    async fn get_gas_lift_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        test_date_ms: Option<i64>,
    ) -> Result<Option<GasLiftAnalysisRecord>, StorageError>;
}

/// 趋势项目录接口
#[async_trait]
pub trait HistoricalStore: Send + Sync {
    async fn list_trend_items(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
    ) -> Result<Vec<TrendItemRecord>, StorageError>;
}

/// 关系库历史接口（老井）
///
/// 时间区间为左闭右开 `[from_ms, to_ms)`。
#[async_trait]
pub trait DataHistorySqlStore: Send + Sync {
    /// 按寄存器地址查询历史点
    async fn get_parameter_history(
        &self,
        ctx: &CallContext,
        node_id: &str,
        address: i32,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<TrendPointRecord>, StorageError>;

    /// 批量查询日统计
    async fn get_daily_history(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        metric: DailyMetric,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<DailyHistoryRecord>, StorageError>;
}

/// 时序库接口（新井）
///
/// 时间区间为左闭右开 `[from_ms, to_ms)`。
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    async fn get_channel_points(
        &self,
        ctx: &CallContext,
        asset_ids: &[Uuid],
        channel: &str,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<ChannelPointRecord>, StorageError>;
}

/// 分组状态存储接口
///
/// 各来源取值接口均为批量查询，按节点 id 过滤。
#[async_trait]
pub trait GroupStatusStore: Send + Sync {
    /// 列出用户可见视图（本人创建 + 全局）
    async fn list_views(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<Vec<ViewRecord>, StorageError>;

    async fn find_view(
        &self,
        ctx: &CallContext,
        view_id: &str,
    ) -> Result<Option<ViewRecord>, StorageError>;

    async fn list_view_columns(
        &self,
        ctx: &CallContext,
        view_id: &str,
    ) -> Result<Vec<ViewColumnRecord>, StorageError>;

    /// 解析分组成员
    async fn list_group_assets(
        &self,
        ctx: &CallContext,
        group_name: &str,
    ) -> Result<Vec<AssetRecord>, StorageError>;

    async fn get_node_summaries(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
    ) -> Result<Vec<NodeSummaryRecord>, StorageError>;

    async fn get_parameter_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        addresses: &[i32],
    ) -> Result<Vec<ParameterValueRecord>, StorageError>;

    async fn get_facility_tag_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        tag_names: &[String],
    ) -> Result<Vec<FacilityTagValueRecord>, StorageError>;

    async fn get_param_standard_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        param_standard_types: &[i32],
    ) -> Result<Vec<ParamStandardValueRecord>, StorageError>;

    async fn get_formulas(
        &self,
        ctx: &CallContext,
        formula_ids: &[i32],
    ) -> Result<Vec<FormulaRecord>, StorageError>;
}

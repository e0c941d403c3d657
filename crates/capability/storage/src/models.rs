//! 数据模型
//!
//! 定义所有存储相关的记录结构：
//! - 资产模型：AssetRecord, AssetStatusRecord, StatusRegisterRecord
//! - 报警与异常：AlarmRecord, ExceptionRecord
//! - 用户偏好与多语言短语：UserPreferenceRecord, PhraseRecord
//! - 分析结果：RodLiftAnalysisRecord, EspAnalysisRecord, GasLiftAnalysisRecord
//! - 趋势与历史：TrendItemRecord, TrendPointRecord, DailyHistoryRecord, ChannelPointRecord
//! - 分组视图：ViewRecord, ViewColumnRecord, NodeSummaryRecord 及各来源取值

use domain::{IndustryApplication, SourceType, Unit, UnitSystem};
use uuid::Uuid;

/// 资产（井）记录。
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub asset_id: Uuid,
    pub node_id: String,
    pub customer_id: Uuid,
    pub name: String,
    pub application: IndustryApplication,
    /// 历史数据保存在关系库（而非时序库）中的老井。
    pub is_legacy: bool,
    pub enabled: bool,
}

/// 状态寄存器取值。
#[derive(Debug, Clone)]
pub struct StatusRegisterRecord {
    pub address: i32,
    pub phrase_id: Option<i32>,
    pub description: String,
    pub value: f64,
    pub unit: Unit,
    pub decimals: u8,
}

/// 资产最新扫描状态。
#[derive(Debug, Clone)]
pub struct AssetStatusRecord {
    pub asset_id: Uuid,
    pub run_status: Option<String>,
    pub comm_status: Option<String>,
    pub last_good_scan_ms: Option<i64>,
    pub time_in_state_minutes: Option<i64>,
    pub today_runtime_pct: Option<f64>,
    pub yesterday_runtime_pct: Option<f64>,
    pub operational_score: Option<f64>,
    pub registers: Vec<StatusRegisterRecord>,
}

/// 报警状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Active,
    Acknowledged,
    Cleared,
}

/// 报警记录。
#[derive(Debug, Clone)]
pub struct AlarmRecord {
    pub node_id: String,
    pub address: i32,
    pub description: String,
    pub priority: i32,
    pub state: AlarmState,
    pub raised_at_ms: Option<i64>,
}

/// 异常记录。
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    pub node_id: String,
    pub description: String,
    pub priority: i32,
}

/// 用户展示偏好。
#[derive(Debug, Clone)]
pub struct UserPreferenceRecord {
    pub user_id: String,
    pub locale: String,
    pub unit_system: UnitSystem,
}

/// 多语言短语。
#[derive(Debug, Clone)]
pub struct PhraseRecord {
    pub phrase_id: i32,
    pub locale: String,
    pub text: String,
}

// ============================================================================
// 分析结果
// ============================================================================

/// 有杆泵功图分析结果（原始值均为英制）。
#[derive(Debug, Clone, Default)]
pub struct RodLiftAnalysisRecord {
    pub asset_id: Uuid,
    pub card_date_ms: i64,
    pub pump_depth_ft: Option<f64>,
    pub pump_diameter_in: Option<f64>,
    pub stroke_length_in: Option<f64>,
    pub spm: Option<f64>,
    pub gross_rate_bpd: Option<f64>,
    pub pump_fillage_pct: Option<f64>,
    pub pump_efficiency_pct: Option<f64>,
    pub fluid_level_ft: Option<f64>,
    pub pump_intake_pressure_psi: Option<f64>,
    pub peak_load_lbs: Option<f64>,
    pub min_load_lbs: Option<f64>,
    pub gearbox_loading_pct: Option<f64>,
    pub rod_loading_pct: Option<f64>,
    pub structural_loading_pct: Option<f64>,
}

/// 电潜泵分析结果。
#[derive(Debug, Clone, Default)]
pub struct EspAnalysisRecord {
    pub asset_id: Uuid,
    pub test_date_ms: i64,
    pub pump_name: Option<String>,
    pub stage_count: Option<u32>,
    pub pump_intake_pressure_psi: Option<f64>,
    pub discharge_pressure_psi: Option<f64>,
    pub head_ft: Option<f64>,
    pub flow_rate_bpd: Option<f64>,
    pub frequency_hz: Option<f64>,
    pub motor_load_pct: Option<f64>,
    pub motor_current_amps: Option<f64>,
    pub pump_efficiency_pct: Option<f64>,
    pub recommended_min_rate_bpd: Option<f64>,
    pub recommended_max_rate_bpd: Option<f64>,
}

/// 气举阀状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    Open,
    Closed,
    Injecting,
    Unknown,
}

/// 气举阀记录。
#[derive(Debug, Clone)]
pub struct GasLiftValveRecord {
    pub number: u32,
    pub depth_ft: f64,
    pub port_size_in: Option<f64>,
    pub test_rack_opening_psi: Option<f64>,
    pub state: ValveState,
}

/// 气举分析结果。
#[derive(Debug, Clone, Default)]
pub struct GasLiftAnalysisRecord {
    pub asset_id: Uuid,
    pub test_date_ms: i64,
    pub injection_rate_mcfd: Option<f64>,
    pub tubing_pressure_psi: Option<f64>,
    pub casing_pressure_psi: Option<f64>,
    pub injection_depth_ft: Option<f64>,
    pub flowing_bhp_psi: Option<f64>,
    pub gross_rate_bpd: Option<f64>,
    pub valves: Vec<GasLiftValveRecord>,
}

// ============================================================================
// 趋势与历史
// ============================================================================

/// 可绘制趋势的数据项。
///
/// 老井按寄存器地址从关系库读取，新井按通道名从时序库读取。
#[derive(Debug, Clone)]
pub struct TrendItemRecord {
    pub asset_id: Uuid,
    pub key: String,
    pub phrase_id: Option<i32>,
    pub description: String,
    pub unit: Unit,
    pub decimals: u8,
    pub address: Option<i32>,
    pub channel: Option<String>,
}

/// 趋势点。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPointRecord {
    pub ts_ms: i64,
    pub value: f64,
}

/// 日统计指标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DailyMetric {
    /// 当日运行小时数。
    RuntimeHours,
    /// 当日平均注气量（Mcf/d）。
    GasInjectionRate,
}

impl DailyMetric {
    /// 时序库中对应的通道名。
    pub fn channel(&self) -> &'static str {
        match self {
            DailyMetric::RuntimeHours => "runtime_hours",
            DailyMetric::GasInjectionRate => "gas_injection_rate",
        }
    }
}

/// 关系库中的日统计记录（老井）。
#[derive(Debug, Clone)]
pub struct DailyHistoryRecord {
    pub node_id: String,
    pub metric: DailyMetric,
    pub day_ms: i64,
    pub value: f64,
}

/// 时序库通道点（新井）。
#[derive(Debug, Clone)]
pub struct ChannelPointRecord {
    pub asset_id: Uuid,
    pub channel: String,
    pub ts_ms: i64,
    pub value: f64,
}

// ============================================================================
// 分组视图
// ============================================================================

/// 分组状态视图。
#[derive(Debug, Clone)]
pub struct ViewRecord {
    pub view_id: String,
    pub name: String,
    pub owner_user_id: Option<String>,
    pub is_global: bool,
}

/// 列对齐方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

impl ColumnAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnAlign::Left => "left",
            ColumnAlign::Center => "center",
            ColumnAlign::Right => "right",
        }
    }
}

/// 参数标准列的多值聚合方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamStandardAggregate {
    #[default]
    Sum,
    Max,
}

/// 条件格式运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Between,
    TextEquals,
    TextContains,
}

/// 列条件格式规则。
#[derive(Debug, Clone)]
pub struct ConditionalFormatRecord {
    pub operator: FormatOperator,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub text: Option<String>,
    pub back_color: Option<String>,
    pub fore_color: Option<String>,
}

/// 视图列定义。
///
/// `source_key` 的含义随 `source_type` 变化：寄存器地址、设施标签名、
/// 参数标准类型、公式 id 或公共字段名。
#[derive(Debug, Clone)]
pub struct ViewColumnRecord {
    pub column_id: i32,
    pub view_id: String,
    pub name: String,
    pub position: i32,
    pub source_type: SourceType,
    pub source_key: String,
    pub width: i32,
    pub align: ColumnAlign,
    pub unit: Option<Unit>,
    pub decimals: u8,
    pub aggregate: ParamStandardAggregate,
    pub formats: Vec<ConditionalFormatRecord>,
}

/// 节点汇总（公共字段来源）。
#[derive(Debug, Clone)]
pub struct NodeSummaryRecord {
    pub node_id: String,
    pub asset_id: Uuid,
    pub well_name: String,
    pub application: IndustryApplication,
    pub enabled: bool,
    pub run_status: Option<String>,
    pub comm_status: Option<String>,
    pub last_good_scan_ms: Option<i64>,
    pub time_in_state_minutes: Option<i64>,
    pub today_runtime_pct: Option<f64>,
    pub yesterday_runtime_pct: Option<f64>,
    pub operational_score: Option<f64>,
    pub alarm_count: u32,
    pub camera_alarm_count: u32,
}

/// 寄存器参数取值。
#[derive(Debug, Clone)]
pub struct ParameterValueRecord {
    pub node_id: String,
    pub address: i32,
    pub value: f64,
    pub unit: Unit,
}

/// 设施标签取值。
#[derive(Debug, Clone)]
pub struct FacilityTagValueRecord {
    pub node_id: String,
    pub tag_name: String,
    pub value: f64,
    pub unit: Unit,
    pub in_alarm: bool,
}

/// 参数标准取值（同一节点同一类型可能有多条）。
#[derive(Debug, Clone)]
pub struct ParamStandardValueRecord {
    pub node_id: String,
    pub param_standard_type: i32,
    pub value: f64,
    pub unit: Unit,
}

/// 公式定义。
#[derive(Debug, Clone)]
pub struct FormulaRecord {
    pub formula_id: i32,
    pub expression: String,
}

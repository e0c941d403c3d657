//! 列格式化：公共字段、原始值与格式化器工厂。

use api_contract::CellDto;
use domain::{SourceType, Unit};
use prodmon_locale::format;
use prodmon_storage::ViewColumnRecord;
use prodmon_units::{format_with_unit, round_to};

pub const ALARM_RED: &str = "#FF0000";
pub const SCORE_GREEN: &str = "#00B050";
pub const SCORE_AMBER: &str = "#FFC000";
const WHITE: &str = "#FFFFFF";

const GOOD_SCORE: f64 = 80.0;
const FAIR_SCORE: f64 = 50.0;

/// 公共字段（来自节点汇总）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonField {
    NodeId,
    WellName,
    Application,
    Enabled,
    RunStatus,
    CommStatus,
    LastGoodScan,
    TimeInState,
    TodayRuntime,
    YesterdayRuntime,
    OperationalScore,
    AlarmCount,
    CameraAlarms,
}

impl CommonField {
    /// 不区分大小写，忽略 `_` / 空格（`"Today Runtime"`、`today_runtime` 均可）。
    pub fn parse(source_key: &str) -> Option<Self> {
        let key: String = source_key
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match key.as_str() {
            "nodeid" => CommonField::NodeId,
            "wellname" => CommonField::WellName,
            "application" => CommonField::Application,
            "enabled" => CommonField::Enabled,
            "runstatus" => CommonField::RunStatus,
            "commstatus" => CommonField::CommStatus,
            "lastgoodscan" => CommonField::LastGoodScan,
            "timeinstate" => CommonField::TimeInState,
            "todayruntime" => CommonField::TodayRuntime,
            "yesterdayruntime" => CommonField::YesterdayRuntime,
            "operationalscore" => CommonField::OperationalScore,
            "alarmcount" => CommonField::AlarmCount,
            "cameraalarms" => CommonField::CameraAlarms,
            _ => return None,
        };
        Some(field)
    }
}

/// 格式化前的单元格取值（数值已完成单位换算）。
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Number(f64),
    Quantity { value: f64, unit: Unit },
    Text(String),
}

impl RawValue {
    pub fn number(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) | RawValue::Quantity { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// 列格式化器。
pub trait ColumnFormatter: Send + Sync {
    fn format(&self, raw: &RawValue) -> CellDto;
}

/// 文本 / 缺省数值格式化。
pub struct NumericFormatter {
    pub decimals: u8,
}

impl ColumnFormatter for NumericFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        match raw {
            RawValue::Empty => CellDto::default(),
            RawValue::Text(text) => CellDto {
                text: text.clone(),
                ..CellDto::default()
            },
            RawValue::Number(value) => {
                let rounded = round_to(*value, self.decimals);
                CellDto {
                    value: Some(rounded),
                    text: format::number(rounded, self.decimals),
                    ..CellDto::default()
                }
            }
            RawValue::Quantity { value, unit } => {
                let rounded = round_to(*value, self.decimals);
                CellDto {
                    value: Some(rounded),
                    text: format_with_unit(rounded, *unit, self.decimals),
                    ..CellDto::default()
                }
            }
        }
    }
}

pub struct PercentFormatter {
    pub decimals: u8,
}

impl ColumnFormatter for PercentFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        match raw.number() {
            Some(value) => {
                let rounded = round_to(value, self.decimals);
                CellDto {
                    value: Some(rounded),
                    text: format::percent(rounded, self.decimals),
                    ..CellDto::default()
                }
            }
            None => CellDto::default(),
        }
    }
}

/// 状态持续时间（分钟）。
pub struct DurationFormatter;

impl ColumnFormatter for DurationFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        match raw.number() {
            Some(minutes) => CellDto {
                value: Some(minutes),
                text: format::duration_minutes(minutes as i64),
                ..CellDto::default()
            },
            None => CellDto::default(),
        }
    }
}

/// 毫秒时间戳。
pub struct TimestampFormatter;

impl ColumnFormatter for TimestampFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        match raw.number() {
            Some(ts_ms) => CellDto {
                value: Some(ts_ms),
                text: format::timestamp(ts_ms as i64).unwrap_or_default(),
                ..CellDto::default()
            },
            None => CellDto::default(),
        }
    }
}

/// 摄像头报警数：大于零时标红；无汇总时为空单元格。
pub struct CameraAlarmFormatter;

impl ColumnFormatter for CameraAlarmFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        let Some(count) = raw.number() else {
            return CellDto::default();
        };
        let count = count.max(0.0) as u64;
        let text = if count == 1 {
            "1 alarm".to_string()
        } else {
            format!("{count} alarms")
        };
        let alarmed = count > 0;
        CellDto {
            value: Some(count as f64),
            text,
            back_color: alarmed.then(|| ALARM_RED.to_string()),
            fore_color: alarmed.then(|| WHITE.to_string()),
            classification: None,
        }
    }
}

/// 运行评分：Good ≥ 80 绿色，Fair ≥ 50 琥珀色，其余 Poor 红色。
pub struct OperationalScoreFormatter;

impl ColumnFormatter for OperationalScoreFormatter {
    fn format(&self, raw: &RawValue) -> CellDto {
        let Some(score) = raw.number() else {
            return CellDto::default();
        };
        let (classification, color) = if score >= GOOD_SCORE {
            ("Good", SCORE_GREEN)
        } else if score >= FAIR_SCORE {
            ("Fair", SCORE_AMBER)
        } else {
            ("Poor", ALARM_RED)
        };
        let rounded = round_to(score, 0);
        CellDto {
            value: Some(rounded),
            text: format::number(rounded, 0),
            back_color: Some(color.to_string()),
            fore_color: None,
            classification: Some(classification.to_string()),
        }
    }
}

/// 按列定义选择格式化器。
pub struct ColumnFormatterFactory;

impl ColumnFormatterFactory {
    pub fn for_column(column: &ViewColumnRecord) -> Box<dyn ColumnFormatter> {
        if column.source_type != SourceType::Common {
            return Box::new(NumericFormatter {
                decimals: column.decimals,
            });
        }
        match CommonField::parse(&column.source_key) {
            Some(CommonField::CameraAlarms) => Box::new(CameraAlarmFormatter),
            Some(CommonField::OperationalScore) => Box::new(OperationalScoreFormatter),
            Some(CommonField::TodayRuntime | CommonField::YesterdayRuntime) => {
                Box::new(PercentFormatter {
                    decimals: column.decimals,
                })
            }
            Some(CommonField::TimeInState) => Box::new(DurationFormatter),
            Some(CommonField::LastGoodScan) => Box::new(TimestampFormatter),
            Some(CommonField::AlarmCount) => Box::new(NumericFormatter { decimals: 0 }),
            _ => Box::new(NumericFormatter {
                decimals: column.decimals,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_field_names_are_lenient() {
        assert_eq!(CommonField::parse("CameraAlarms"), Some(CommonField::CameraAlarms));
        assert_eq!(CommonField::parse("today_runtime"), Some(CommonField::TodayRuntime));
        assert_eq!(CommonField::parse("Time In State"), Some(CommonField::TimeInState));
        assert_eq!(CommonField::parse("pressure"), None);
    }

    #[test]
    fn camera_alarms_turn_red() {
        let quiet = CameraAlarmFormatter.format(&RawValue::Number(0.0));
        assert_eq!(quiet.text, "0 alarms");
        assert!(quiet.back_color.is_none());

        let one = CameraAlarmFormatter.format(&RawValue::Number(1.0));
        assert_eq!(one.text, "1 alarm");
        assert_eq!(one.back_color.as_deref(), Some(ALARM_RED));
    }

    #[test]
    fn operational_score_bands() {
        let classify = |score: f64| {
            OperationalScoreFormatter
                .format(&RawValue::Number(score))
                .classification
        };
        assert_eq!(classify(80.0).as_deref(), Some("Good"));
        assert_eq!(classify(79.9).as_deref(), Some("Fair"));
        assert_eq!(classify(50.0).as_deref(), Some("Fair"));
        assert_eq!(classify(49.0).as_deref(), Some("Poor"));
        assert_eq!(
            OperationalScoreFormatter.format(&RawValue::Empty),
            CellDto::default()
        );
    }

    #[test]
    fn numeric_quantities_carry_units() {
        let cell = NumericFormatter { decimals: 1 }.format(&RawValue::Quantity {
            value: 689.4757,
            unit: Unit::Kilopascals,
        });
        assert_eq!(cell.text, "689.5 kPa");
        assert_eq!(cell.value, Some(689.5));
    }
}

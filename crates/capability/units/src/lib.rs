//! 单位换算：存储值（英制）到用户单位制的转换与展示。

use domain::{Measurement, Unit, UnitKind, UnitSystem};
use std::sync::Arc;

/// 单位换算错误。
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("cannot convert {from:?} to {to:?}")]
    Incompatible { from: Unit, to: Unit },
}

/// 单位换算提供者抽象。
pub trait UnitConversion: Send + Sync {
    fn convert(&self, value: f64, from: Unit, to: Unit) -> Result<f64, UnitError>;
}

/// 内置换算表实现。
///
/// 同一量纲内经由基准单位换算；温度为仿射换算。
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUnitConversion;

/// 单位相对于同量纲基准单位的系数（value_in_base = value * factor）。
fn base_factor(unit: Unit) -> f64 {
    match unit {
        Unit::Psi => 1.0,
        Unit::Kilopascals => 0.145_037_737_7,
        Unit::Feet => 1.0,
        Unit::Meters => 3.280_839_895,
        Unit::Inches => 1.0,
        Unit::Millimeters => 0.039_370_078_74,
        Unit::BarrelsPerDay => 1.0,
        Unit::CubicMetersPerDay => 6.289_810_770,
        Unit::McfPerDay => 1.0,
        Unit::ThousandCubicMetersPerDay => 35.314_666_72,
        Unit::Pounds => 1.0,
        Unit::Kilograms => 2.204_622_622,
        Unit::Horsepower => 1.0,
        Unit::Kilowatts => 1.341_022_090,
        _ => 1.0,
    }
}

fn to_fahrenheit(value: f64, from: Unit) -> f64 {
    match from {
        Unit::Celsius => value * 9.0 / 5.0 + 32.0,
        _ => value,
    }
}

fn from_fahrenheit(value: f64, to: Unit) -> f64 {
    match to {
        Unit::Celsius => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

impl UnitConversion for StandardUnitConversion {
    fn convert(&self, value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
        if from == to {
            return Ok(value);
        }
        if from.kind() != to.kind() {
            return Err(UnitError::Incompatible { from, to });
        }
        if from.kind() == UnitKind::Temperature {
            return Ok(from_fahrenheit(to_fahrenheit(value, from), to));
        }
        Ok(value * base_factor(from) / base_factor(to))
    }
}

/// 指定单位制下某量纲的首选单位；不区分单位制的量纲返回 `None`。
pub fn preferred_unit(kind: UnitKind, system: UnitSystem) -> Option<Unit> {
    let unit = match (kind, system) {
        (UnitKind::Pressure, UnitSystem::Imperial) => Unit::Psi,
        (UnitKind::Pressure, UnitSystem::Metric) => Unit::Kilopascals,
        (UnitKind::Length, UnitSystem::Imperial) => Unit::Feet,
        (UnitKind::Length, UnitSystem::Metric) => Unit::Meters,
        (UnitKind::ShortLength, UnitSystem::Imperial) => Unit::Inches,
        (UnitKind::ShortLength, UnitSystem::Metric) => Unit::Millimeters,
        (UnitKind::FlowRate, UnitSystem::Imperial) => Unit::BarrelsPerDay,
        (UnitKind::FlowRate, UnitSystem::Metric) => Unit::CubicMetersPerDay,
        (UnitKind::GasFlowRate, UnitSystem::Imperial) => Unit::McfPerDay,
        (UnitKind::GasFlowRate, UnitSystem::Metric) => Unit::ThousandCubicMetersPerDay,
        (UnitKind::Temperature, UnitSystem::Imperial) => Unit::Fahrenheit,
        (UnitKind::Temperature, UnitSystem::Metric) => Unit::Celsius,
        (UnitKind::Weight, UnitSystem::Imperial) => Unit::Pounds,
        (UnitKind::Weight, UnitSystem::Metric) => Unit::Kilograms,
        _ => return None,
    };
    Some(unit)
}

/// 带展示文本的换算结果。
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayValue {
    pub value: Option<f64>,
    pub unit: Unit,
    pub text: String,
}

/// 单位换算入口。
#[derive(Clone)]
pub struct UnitConverter {
    conversion: Arc<dyn UnitConversion>,
}

impl UnitConverter {
    pub fn new(conversion: Arc<dyn UnitConversion>) -> Self {
        Self { conversion }
    }

    /// 使用内置换算表。
    pub fn standard() -> Self {
        Self::new(Arc::new(StandardUnitConversion))
    }

    /// 目标单位制下应展示的单位。
    pub fn target_unit(&self, unit: Unit, system: UnitSystem) -> Unit {
        preferred_unit(unit.kind(), system).unwrap_or(unit)
    }

    pub fn convert(&self, value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
        self.conversion.convert(value, from, to)
    }

    /// 换算到目标单位制。
    pub fn to_system(
        &self,
        measurement: Measurement,
        system: UnitSystem,
    ) -> Result<Measurement, UnitError> {
        let target = self.target_unit(measurement.unit, system);
        let value = self
            .conversion
            .convert(measurement.value, measurement.unit, target)?;
        Ok(Measurement::new(value, target))
    }

    /// 换算并格式化；换算失败时按原单位展示。
    pub fn display(
        &self,
        value: Option<f64>,
        unit: Unit,
        system: UnitSystem,
        decimals: u8,
    ) -> DisplayValue {
        let Some(value) = value else {
            return DisplayValue {
                value: None,
                unit: self.target_unit(unit, system),
                text: String::new(),
            };
        };
        let converted = self
            .to_system(Measurement::new(value, unit), system)
            .unwrap_or(Measurement::new(value, unit));
        let rounded = round_to(converted.value, decimals);
        DisplayValue {
            value: Some(rounded),
            unit: converted.unit,
            text: format_with_unit(rounded, converted.unit, decimals),
        }
    }
}

/// 按小数位四舍五入。
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// `"{value} {symbol}"`；无量纲值只输出数字，百分比紧跟 `%`。
pub fn format_with_unit(value: f64, unit: Unit, decimals: u8) -> String {
    let number = format!("{:.*}", usize::from(decimals), value);
    match unit {
        Unit::None => number,
        Unit::Percent => format!("{number}%"),
        _ => format!("{number} {}", unit.symbol()),
    }
}

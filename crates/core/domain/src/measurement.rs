//! 带单位的测量值。

/// 单位量纲。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Pressure,
    Length,
    ShortLength,
    FlowRate,
    GasFlowRate,
    Temperature,
    Weight,
    Percent,
    StrokeRate,
    Frequency,
    Current,
    Power,
    Dimensionless,
}

/// 具体单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Psi,
    Kilopascals,
    Feet,
    Meters,
    Inches,
    Millimeters,
    BarrelsPerDay,
    CubicMetersPerDay,
    McfPerDay,
    ThousandCubicMetersPerDay,
    Fahrenheit,
    Celsius,
    Pounds,
    Kilograms,
    Percent,
    StrokesPerMinute,
    Hertz,
    Amps,
    Horsepower,
    Kilowatts,
    None,
}

impl Unit {
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Psi | Unit::Kilopascals => UnitKind::Pressure,
            Unit::Feet | Unit::Meters => UnitKind::Length,
            Unit::Inches | Unit::Millimeters => UnitKind::ShortLength,
            Unit::BarrelsPerDay | Unit::CubicMetersPerDay => UnitKind::FlowRate,
            Unit::McfPerDay | Unit::ThousandCubicMetersPerDay => UnitKind::GasFlowRate,
            Unit::Fahrenheit | Unit::Celsius => UnitKind::Temperature,
            Unit::Pounds | Unit::Kilograms => UnitKind::Weight,
            Unit::Percent => UnitKind::Percent,
            Unit::StrokesPerMinute => UnitKind::StrokeRate,
            Unit::Hertz => UnitKind::Frequency,
            Unit::Amps => UnitKind::Current,
            Unit::Horsepower | Unit::Kilowatts => UnitKind::Power,
            Unit::None => UnitKind::Dimensionless,
        }
    }

    /// 展示用单位符号。
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Psi => "psi",
            Unit::Kilopascals => "kPa",
            Unit::Feet => "ft",
            Unit::Meters => "m",
            Unit::Inches => "in",
            Unit::Millimeters => "mm",
            Unit::BarrelsPerDay => "bbl/d",
            Unit::CubicMetersPerDay => "m3/d",
            Unit::McfPerDay => "Mcf/d",
            Unit::ThousandCubicMetersPerDay => "e3m3/d",
            Unit::Fahrenheit => "°F",
            Unit::Celsius => "°C",
            Unit::Pounds => "lb",
            Unit::Kilograms => "kg",
            Unit::Percent => "%",
            Unit::StrokesPerMinute => "spm",
            Unit::Hertz => "Hz",
            Unit::Amps => "A",
            Unit::Horsepower => "hp",
            Unit::Kilowatts => "kW",
            Unit::None => "",
        }
    }
}

/// 单位制。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    /// 大小写不敏感解析。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "imperial" | "us" | "english" => Some(UnitSystem::Imperial),
            "metric" | "si" => Some(UnitSystem::Metric),
            _ => None,
        }
    }
}

/// 带单位的测量值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

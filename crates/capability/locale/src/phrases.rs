//! 服务使用的短语 id 与英文缺省文本。

use domain::IndustryApplication;
use prodmon_storage::{AlarmState, ValveState};

/// 短语键：id + 缺省文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseKey {
    pub id: i32,
    pub default_text: &'static str,
}

impl PhraseKey {
    pub const fn new(id: i32, default_text: &'static str) -> Self {
        Self { id, default_text }
    }
}

/// 取一组短语键的 id。
pub fn ids(keys: &[PhraseKey]) -> Vec<i32> {
    keys.iter().map(|key| key.id).collect()
}

// 通用
pub const ROD_LIFT: PhraseKey = PhraseKey::new(100, "Rod Lift");
pub const ESP: PhraseKey = PhraseKey::new(101, "ESP");
pub const GAS_LIFT: PhraseKey = PhraseKey::new(102, "Gas Lift");
pub const UNKNOWN: PhraseKey = PhraseKey::new(103, "Unknown");
pub const ENABLED: PhraseKey = PhraseKey::new(110, "Enabled");
pub const DISABLED: PhraseKey = PhraseKey::new(111, "Disabled");
pub const ALARM_ACTIVE: PhraseKey = PhraseKey::new(120, "Active");
pub const ALARM_ACKNOWLEDGED: PhraseKey = PhraseKey::new(121, "Acknowledged");
pub const ALARM_CLEARED: PhraseKey = PhraseKey::new(122, "Cleared");

// 有杆泵
pub const PUMP_DEPTH: PhraseKey = PhraseKey::new(200, "Pump Depth");
pub const PUMP_DIAMETER: PhraseKey = PhraseKey::new(201, "Pump Diameter");
pub const STROKE_LENGTH: PhraseKey = PhraseKey::new(202, "Stroke Length");
pub const STROKES_PER_MINUTE: PhraseKey = PhraseKey::new(203, "Strokes Per Minute");
pub const GROSS_RATE: PhraseKey = PhraseKey::new(204, "Gross Rate");
pub const PUMP_FILLAGE: PhraseKey = PhraseKey::new(205, "Pump Fillage");
pub const PUMP_EFFICIENCY: PhraseKey = PhraseKey::new(206, "Pump Efficiency");
pub const FLUID_LEVEL: PhraseKey = PhraseKey::new(207, "Fluid Level");
pub const PUMP_INTAKE_PRESSURE: PhraseKey = PhraseKey::new(208, "Pump Intake Pressure");
pub const FLUID_ABOVE_PUMP: PhraseKey = PhraseKey::new(209, "Fluid Above Pump");
pub const PEAK_LOAD: PhraseKey = PhraseKey::new(210, "Peak Polished Rod Load");
pub const MIN_LOAD: PhraseKey = PhraseKey::new(211, "Minimum Polished Rod Load");
pub const GEARBOX_LOADING: PhraseKey = PhraseKey::new(212, "Gearbox Loading");
pub const ROD_LOADING: PhraseKey = PhraseKey::new(213, "Rod Loading");
pub const STRUCTURAL_LOADING: PhraseKey = PhraseKey::new(214, "Structural Loading");
pub const PUMP_FULL: PhraseKey = PhraseKey::new(220, "Full Pump");
pub const PUMP_PARTIAL: PhraseKey = PhraseKey::new(221, "Partial Fillage");
pub const PUMP_PUMPED_OFF: PhraseKey = PhraseKey::new(222, "Pumped Off");

// 电潜泵
pub const DISCHARGE_PRESSURE: PhraseKey = PhraseKey::new(300, "Discharge Pressure");
pub const PUMP_DIFFERENTIAL: PhraseKey = PhraseKey::new(301, "Pump Differential Pressure");
pub const HEAD: PhraseKey = PhraseKey::new(302, "Head");
pub const FLOW_RATE: PhraseKey = PhraseKey::new(303, "Flow Rate");
pub const FREQUENCY: PhraseKey = PhraseKey::new(304, "Frequency");
pub const MOTOR_LOAD: PhraseKey = PhraseKey::new(305, "Motor Load");
pub const MOTOR_CURRENT: PhraseKey = PhraseKey::new(306, "Motor Current");
pub const STAGE_COUNT: PhraseKey = PhraseKey::new(307, "Stages");
pub const REGION_DOWNTHRUST: PhraseKey = PhraseKey::new(310, "Downthrust");
pub const REGION_UPTHRUST: PhraseKey = PhraseKey::new(311, "Upthrust");
pub const REGION_WITHIN: PhraseKey = PhraseKey::new(312, "Within Recommended Range");

// 气举
pub const INJECTION_RATE: PhraseKey = PhraseKey::new(400, "Gas Injection Rate");
pub const TUBING_PRESSURE: PhraseKey = PhraseKey::new(401, "Tubing Pressure");
pub const CASING_PRESSURE: PhraseKey = PhraseKey::new(402, "Casing Pressure");
pub const INJECTION_DEPTH: PhraseKey = PhraseKey::new(403, "Injection Depth");
pub const FLOWING_BHP: PhraseKey = PhraseKey::new(404, "Flowing Bottomhole Pressure");
pub const INJECTION_GLR: PhraseKey = PhraseKey::new(405, "Injection Gas Liquid Ratio");
pub const VALVE_OPEN: PhraseKey = PhraseKey::new(410, "Open");
pub const VALVE_CLOSED: PhraseKey = PhraseKey::new(411, "Closed");
pub const VALVE_INJECTING: PhraseKey = PhraseKey::new(412, "Injecting");

/// 举升方式对应的短语。
pub fn application(application: IndustryApplication) -> PhraseKey {
    match application {
        IndustryApplication::RodLift => ROD_LIFT,
        IndustryApplication::Esp => ESP,
        IndustryApplication::GasLift => GAS_LIFT,
        IndustryApplication::Unknown => UNKNOWN,
    }
}

pub fn enabled(enabled: bool) -> PhraseKey {
    if enabled { ENABLED } else { DISABLED }
}

pub fn alarm_state(state: AlarmState) -> PhraseKey {
    match state {
        AlarmState::Active => ALARM_ACTIVE,
        AlarmState::Acknowledged => ALARM_ACKNOWLEDGED,
        AlarmState::Cleared => ALARM_CLEARED,
    }
}

pub fn valve_state(state: ValveState) -> PhraseKey {
    match state {
        ValveState::Open => VALVE_OPEN,
        ValveState::Closed => VALVE_CLOSED,
        ValveState::Injecting => VALVE_INJECTING,
        ValveState::Unknown => UNKNOWN,
    }
}

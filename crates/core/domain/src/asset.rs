//! 资产相关的枚举：举升方式、列数据来源、运行状态分类。

/// 井的举升方式（行业应用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndustryApplication {
    RodLift,
    Esp,
    GasLift,
    Unknown,
}

impl IndustryApplication {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryApplication::RodLift => "rod_lift",
            IndustryApplication::Esp => "esp",
            IndustryApplication::GasLift => "gas_lift",
            IndustryApplication::Unknown => "unknown",
        }
    }
}

/// 分组视图列的数据来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Parameter,
    Facility,
    ParamStandard,
    Formula,
    Common,
}

impl SourceType {
    /// 按持久化编码解析（1..=5）。
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(SourceType::Parameter),
            2 => Some(SourceType::Facility),
            3 => Some(SourceType::ParamStandard),
            4 => Some(SourceType::Formula),
            5 => Some(SourceType::Common),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Parameter => "parameter",
            SourceType::Facility => "facility",
            SourceType::ParamStandard => "param_standard",
            SourceType::Formula => "formula",
            SourceType::Common => "common",
        }
    }
}

/// 运行状态分类（用于分组汇总）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunStatusClass {
    Running,
    Idle,
    Shutdown,
    Unknown,
}

impl RunStatusClass {
    pub const ALL: [RunStatusClass; 4] = [
        RunStatusClass::Running,
        RunStatusClass::Idle,
        RunStatusClass::Shutdown,
        RunStatusClass::Unknown,
    ];

    /// 按控制器上报的运行状态文本分类。
    ///
    /// 停机关键字优先匹配（"Shutdown - Running Failure" 归为停机）。
    pub fn classify(run_status: &str) -> Self {
        let text = run_status.trim().to_ascii_lowercase();
        if text.is_empty() {
            return RunStatusClass::Unknown;
        }
        if ["shut", "down", "fail", "stop"]
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            return RunStatusClass::Shutdown;
        }
        if ["idle", "time off", "pumped off"]
            .iter()
            .any(|keyword| text.contains(keyword))
        {
            return RunStatusClass::Idle;
        }
        if text.contains("run") || text.contains("normal") {
            return RunStatusClass::Running;
        }
        RunStatusClass::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatusClass::Running => "running",
            RunStatusClass::Idle => "idle",
            RunStatusClass::Shutdown => "shutdown",
            RunStatusClass::Unknown => "unknown",
        }
    }
}

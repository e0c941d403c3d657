pub mod asset;
pub mod measurement;

pub use asset::{IndustryApplication, RunStatusClass, SourceType};
pub use measurement::{Measurement, Unit, UnitKind, UnitSystem};

/// 调用上下文：所有存储调用共享的执行上下文。
#[derive(Debug, Clone)]
pub struct CallContext {
    pub correlation_id: String,
    pub user_id: Option<String>,
}

impl CallContext {
    /// 构造带 correlation id 的调用上下文。
    pub fn new(correlation_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            user_id,
        }
    }
}

impl Default for CallContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            correlation_id: "".to_string(),
            user_id: None,
        }
    }
}

/// 服务入参封装：correlation id + 可缺省的请求体。
#[derive(Debug, Clone)]
pub struct WithCorrelationId<T> {
    pub correlation_id: String,
    pub value: Option<T>,
}

impl<T> WithCorrelationId<T> {
    pub fn new(correlation_id: impl Into<String>, value: T) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            value: Some(value),
        }
    }

    /// 缺少请求体的入参（用于校验失败路径）。
    pub fn empty(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            value: None,
        }
    }
}

/// 用户展示偏好。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub locale: String,
    pub unit_system: UnitSystem,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            unit_system: UnitSystem::Imperial,
        }
    }
}

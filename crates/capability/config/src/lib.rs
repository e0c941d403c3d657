//! 应用运行配置加载。

use domain::UnitSystem;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub default_locale: String,
    pub default_unit_system: UnitSystem,
    pub downtime_days: i64,
    pub gas_lift_min_injection_mcfd: f64,
    pub seed_demo: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("PRODMON_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let default_locale = read_optional("PRODMON_DEFAULT_LOCALE").unwrap_or_else(|| "en".to_string());
        let default_unit_system = read_unit_system_with_default(
            "PRODMON_DEFAULT_UNIT_SYSTEM",
            UnitSystem::Imperial,
        )?;
        let downtime_days = read_i64_with_default("PRODMON_DOWNTIME_DAYS", 7)?;
        if downtime_days <= 0 {
            return Err(ConfigError::Invalid(
                "PRODMON_DOWNTIME_DAYS".to_string(),
                downtime_days.to_string(),
            ));
        }
        let gas_lift_min_injection_mcfd =
            read_f64_with_default("PRODMON_GAS_LIFT_MIN_INJECTION_MCFD", 50.0)?;
        let seed_demo = read_bool_with_default("PRODMON_SEED_DEMO", true);

        Ok(Self {
            http_addr,
            default_locale,
            default_unit_system,
            downtime_days,
            gas_lift_min_injection_mcfd,
            seed_demo,
        })
    }
}

fn read_i64_with_default(key: &str, default: i64) -> Result<i64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_f64_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_unit_system_with_default(
    key: &str,
    default: UnitSystem,
) -> Result<UnitSystem, ConfigError> {
    match read_optional(key) {
        Some(value) => {
            UnitSystem::parse(&value).ok_or_else(|| ConfigError::Invalid(key.to_string(), value))
        }
        None => Ok(default),
    }
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}

//! 展示格式化。

use chrono::{DateTime, SecondsFormat};

/// 分钟数 → `"1d 2h 5m"`，为零的单位省略，全零输出 `"0m"`。
pub fn duration_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let days = minutes / 1_440;
    let hours = (minutes % 1_440) / 60;
    let mins = minutes % 60;
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 || parts.is_empty() {
        parts.push(format!("{mins}m"));
    }
    parts.join(" ")
}

/// 百分比文本，如 `"85.0%"`。
pub fn percent(value: f64, decimals: u8) -> String {
    format!("{:.*}%", usize::from(decimals), value)
}

pub fn number(value: f64, decimals: u8) -> String {
    format!("{:.*}", usize::from(decimals), value)
}

/// UTC 时间 `"YYYY-MM-DD HH:MM:SS"`；时间戳越界时返回 `None`。
pub fn timestamp(ts_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ts_ms).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// RFC 3339（毫秒精度，`Z` 结尾）。
pub fn rfc3339(ts_ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ts_ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

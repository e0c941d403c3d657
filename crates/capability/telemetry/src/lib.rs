//! 追踪初始化、correlation id 生成与基础计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub service_requests: u64,
    pub service_failures: u64,
    pub store_errors: u64,
    pub grid_rows_built: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    service_requests: AtomicU64,
    service_failures: AtomicU64,
    store_errors: AtomicU64,
    grid_rows_built: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            service_requests: AtomicU64::new(0),
            service_failures: AtomicU64::new(0),
            store_errors: AtomicU64::new(0),
            grid_rows_built: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            service_requests: self.service_requests.load(Ordering::Relaxed),
            service_failures: self.service_failures.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            grid_rows_built: self.grid_rows_built.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 correlation id。
pub fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录服务调用次数。
pub fn record_service_request() {
    metrics().service_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录服务返回失败结果的次数。
pub fn record_service_failure() {
    metrics().service_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录存储层错误次数。
pub fn record_store_error() {
    metrics().store_errors.fetch_add(1, Ordering::Relaxed);
}

/// 记录分组表格构建的行数。
pub fn record_grid_rows(rows: usize) {
    metrics()
        .grid_rows_built
        .fetch_add(rows as u64, Ordering::Relaxed);
}

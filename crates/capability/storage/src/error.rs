//! 存储层错误类型
//!
//! 内存存储的失败情形：
//! - 锁中毒
//! - 请求缺少 correlation id
//! - 时间区间为空
//! - 重复写入
//! - 外部存储实现上报的其他错误

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("lock failed")]
    LockPoisoned,
    #[error("correlation_id required")]
    CorrelationRequired,
    #[error("invalid time range [{from_ms}, {to_ms})")]
    InvalidRange { from_ms: i64, to_ms: i64 },
    #[error("{0} exists")]
    Duplicate(&'static str),
    #[error("{0}")]
    Backend(String),
}

impl StorageError {
    /// 外部存储实现的错误。
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

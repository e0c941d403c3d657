//! 验证辅助函数
//!
//! - ensure_correlation：验证 correlation id 非空
//! - ensure_range：验证时间区间合法

use crate::error::StorageError;
use domain::CallContext;

/// 验证 correlation id 非空
///
/// 所有数据访问都必须能关联到一次请求。
pub fn ensure_correlation(ctx: &CallContext) -> Result<(), StorageError> {
    if ctx.correlation_id.trim().is_empty() {
        return Err(StorageError::CorrelationRequired);
    }
    Ok(())
}

/// 验证时间区间 `[from_ms, to_ms)` 非空
pub fn ensure_range(ctx: &CallContext, from_ms: i64, to_ms: i64) -> Result<(), StorageError> {
    ensure_correlation(ctx)?;
    if from_ms >= to_ms {
        return Err(StorageError::InvalidRange { from_ms, to_ms });
    }
    Ok(())
}

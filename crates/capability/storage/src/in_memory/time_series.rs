//! 时序库内存存储实现（新井）

use crate::error::StorageError;
use crate::models::ChannelPointRecord;
use crate::traits::TimeSeriesStore;
use crate::validation::ensure_range;
use domain::CallContext;
use std::sync::RwLock;
use uuid::Uuid;

/// 时序库内存存储
pub struct InMemoryTimeSeriesStore {
    points: RwLock<Vec<ChannelPointRecord>>,
}

impl InMemoryTimeSeriesStore {
    pub fn new() -> Self {
        Self {
            points: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_point(&self, record: ChannelPointRecord) -> Result<(), StorageError> {
        self.points
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    /// 获取当前累计的点数量（用于测试）
    pub fn len(&self) -> usize {
        self.points.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTimeSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TimeSeriesStore for InMemoryTimeSeriesStore {
    async fn get_channel_points(
        &self,
        ctx: &CallContext,
        asset_ids: &[Uuid],
        channel: &str,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<ChannelPointRecord>, StorageError> {
        ensure_range(ctx, from_ms, to_ms)?;
        let points = self
            .points
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let mut selected: Vec<ChannelPointRecord> = points
            .iter()
            .filter(|item| {
                item.channel == channel
                    && item.ts_ms >= from_ms
                    && item.ts_ms < to_ms
                    && asset_ids.contains(&item.asset_id)
            })
            .cloned()
            .collect();
        selected.sort_by_key(|item| item.ts_ms);
        Ok(selected)
    }
}

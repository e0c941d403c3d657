//! 趋势目录与关系库历史内存存储实现（老井）

use crate::error::StorageError;
use crate::models::{DailyHistoryRecord, DailyMetric, TrendItemRecord, TrendPointRecord};
use crate::traits::{DataHistorySqlStore, HistoricalStore};
use crate::validation::{ensure_correlation, ensure_range};
use domain::CallContext;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 趋势项目录内存存储
pub struct InMemoryHistoricalStore {
    items: RwLock<Vec<TrendItemRecord>>,
}

impl InMemoryHistoricalStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_trend_item(&self, record: TrendItemRecord) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        if items
            .iter()
            .any(|item| item.asset_id == record.asset_id && item.key == record.key)
        {
            return Err(StorageError::Duplicate("trend item"));
        }
        items.push(record);
        Ok(())
    }
}

impl Default for InMemoryHistoricalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HistoricalStore for InMemoryHistoricalStore {
    async fn list_trend_items(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
    ) -> Result<Vec<TrendItemRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .items
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| item.asset_id == asset_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}

/// 关系库历史内存存储
pub struct InMemoryDataHistorySqlStore {
    parameters: RwLock<HashMap<(String, i32), Vec<TrendPointRecord>>>,
    daily: RwLock<Vec<DailyHistoryRecord>>,
}

impl InMemoryDataHistorySqlStore {
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(HashMap::new()),
            daily: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_parameter_point(
        &self,
        node_id: &str,
        address: i32,
        point: TrendPointRecord,
    ) -> Result<(), StorageError> {
        let mut map = self
            .parameters
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.entry((node_id.to_string(), address))
            .or_default()
            .push(point);
        Ok(())
    }

    pub fn insert_daily(&self, record: DailyHistoryRecord) -> Result<(), StorageError> {
        self.daily
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }
}

impl Default for InMemoryDataHistorySqlStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DataHistorySqlStore for InMemoryDataHistorySqlStore {
    async fn get_parameter_history(
        &self,
        ctx: &CallContext,
        node_id: &str,
        address: i32,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<TrendPointRecord>, StorageError> {
        ensure_range(ctx, from_ms, to_ms)?;
        let map = self
            .parameters
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let mut items: Vec<TrendPointRecord> = map
            .get(&(node_id.to_string(), address))
            .map(|points| {
                points
                    .iter()
                    .filter(|point| point.ts_ms >= from_ms && point.ts_ms < to_ms)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by_key(|point| point.ts_ms);
        Ok(items)
    }

    async fn get_daily_history(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        metric: DailyMetric,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<DailyHistoryRecord>, StorageError> {
        ensure_range(ctx, from_ms, to_ms)?;
        let items = self
            .daily
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| {
                        item.metric == metric
                            && item.day_ms >= from_ms
                            && item.day_ms < to_ms
                            && node_ids.contains(&item.node_id)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}

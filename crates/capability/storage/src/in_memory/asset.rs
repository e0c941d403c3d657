//! 资产内存存储实现
//!
//! 功能：
//! - 资产查找（按客户隔离）
//! - 最新扫描状态
//! - 报警与异常列表

use crate::error::StorageError;
use crate::models::{AlarmRecord, AssetRecord, AssetStatusRecord, ExceptionRecord};
use crate::traits::AssetStore;
use crate::validation::ensure_correlation;
use domain::CallContext;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 资产内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryAssetStore {
    assets: RwLock<HashMap<Uuid, AssetRecord>>,
    statuses: RwLock<HashMap<Uuid, AssetStatusRecord>>,
    alarms: RwLock<Vec<AlarmRecord>>,
    exceptions: RwLock<Vec<ExceptionRecord>>,
}

impl InMemoryAssetStore {
    /// 创建新的资产存储
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            statuses: RwLock::new(HashMap::new()),
            alarms: RwLock::new(Vec::new()),
            exceptions: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_asset(&self, record: AssetRecord) -> Result<(), StorageError> {
        let mut map = self
            .assets
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        if map.contains_key(&record.asset_id) {
            return Err(StorageError::Duplicate("asset"));
        }
        map.insert(record.asset_id, record);
        Ok(())
    }

    /// 写入（覆盖）资产扫描状态
    pub fn upsert_status(&self, record: AssetStatusRecord) -> Result<(), StorageError> {
        let mut map = self
            .statuses
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.insert(record.asset_id, record);
        Ok(())
    }

    pub fn insert_alarm(&self, record: AlarmRecord) -> Result<(), StorageError> {
        self.alarms
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_exception(&self, record: ExceptionRecord) -> Result<(), StorageError> {
        self.exceptions
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn find_asset(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<AssetRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let item = self
            .assets
            .read()
            .ok()
            .and_then(|map| map.get(&asset_id).cloned())
            .filter(|item| item.customer_id == customer_id);
        Ok(item)
    }

    async fn get_asset_status(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
    ) -> Result<Option<AssetStatusRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let item = self
            .statuses
            .read()
            .ok()
            .and_then(|map| map.get(&asset_id).cloned());
        Ok(item)
    }

    async fn list_alarms(
        &self,
        ctx: &CallContext,
        node_id: &str,
    ) -> Result<Vec<AlarmRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .alarms
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| item.node_id == node_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn list_exceptions(
        &self,
        ctx: &CallContext,
        node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .exceptions
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| item.node_id == node_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}

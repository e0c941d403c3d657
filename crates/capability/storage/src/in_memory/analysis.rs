//! 分析结果内存存储实现
//!
//! 每口井保存多次分析，按日期精确查找或取最新一次。

use crate::error::StorageError;
use crate::models::{EspAnalysisRecord, GasLiftAnalysisRecord, RodLiftAnalysisRecord};
use crate::traits::AnalysisStore;
use crate::validation::ensure_correlation;
use domain::CallContext;
use std::sync::RwLock;
use uuid::Uuid;

/// 分析结果内存存储
pub struct InMemoryAnalysisStore {
    rod_lift: RwLock<Vec<RodLiftAnalysisRecord>>,
    esp: RwLock<Vec<EspAnalysisRecord>>,
    gas_lift: RwLock<Vec<GasLiftAnalysisRecord>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self {
            rod_lift: RwLock::new(Vec::new()),
            esp: RwLock::new(Vec::new()),
            gas_lift: RwLock::new(Vec::new()),
        }
    }

    pub fn insert_rod_lift(&self, record: RodLiftAnalysisRecord) -> Result<(), StorageError> {
        self.rod_lift
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_esp(&self, record: EspAnalysisRecord) -> Result<(), StorageError> {
        self.esp
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_gas_lift(&self, record: GasLiftAnalysisRecord) -> Result<(), StorageError> {
        self.gas_lift
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }
}

impl Default for InMemoryAnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 按日期精确匹配，或在未指定日期时取最新一条。
fn select_by_date<T: Clone>(
    items: &[T],
    asset_id: Uuid,
    date_ms: Option<i64>,
    key: impl Fn(&T) -> (Uuid, i64),
) -> Option<T> {
    let candidates = items.iter().filter(|item| key(*item).0 == asset_id);
    match date_ms {
        Some(date_ms) => candidates
            .filter(|item| key(*item).1 == date_ms)
            .last()
            .cloned(),
        None => candidates.max_by_key(|item| key(*item).1).cloned(),
    }
}

#[async_trait::async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn get_rod_lift_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        card_date_ms: Option<i64>,
    ) -> Result<Option<RodLiftAnalysisRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .rod_lift
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(select_by_date(items.as_slice(), asset_id, card_date_ms, |item| {
            (item.asset_id, item.card_date_ms)
        }))
    }

    async fn get_esp_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        test_date_ms: Option<i64>,
    ) -> Result<Option<EspAnalysisRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .esp
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(select_by_date(items.as_slice(), asset_id, test_date_ms, |item| {
            (item.asset_id, item.test_date_ms)
        }))
    }

    async fn get_gas_lift_analysis(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        test_date_ms: Option<i64>,
    ) -> Result<Option<GasLiftAnalysisRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .gas_lift
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(select_by_date(items.as_slice(), asset_id, test_date_ms, |item| {
            (item.asset_id, item.test_date_ms)
        }))
    }
}

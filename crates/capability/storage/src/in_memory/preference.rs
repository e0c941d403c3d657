//! 用户偏好内存存储实现

use crate::error::StorageError;
use crate::models::UserPreferenceRecord;
use crate::traits::UserPreferenceStore;
use crate::validation::ensure_correlation;
use domain::CallContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 用户偏好内存存储
pub struct InMemoryUserPreferenceStore {
    preferences: RwLock<HashMap<String, UserPreferenceRecord>>,
}

impl InMemoryUserPreferenceStore {
    pub fn new() -> Self {
        Self {
            preferences: RwLock::new(HashMap::new()),
        }
    }

    pub fn upsert_preferences(&self, record: UserPreferenceRecord) -> Result<(), StorageError> {
        let mut map = self
            .preferences
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.insert(record.user_id.clone(), record);
        Ok(())
    }
}

impl Default for InMemoryUserPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserPreferenceStore for InMemoryUserPreferenceStore {
    async fn find_preferences(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<Option<UserPreferenceRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let item = self
            .preferences
            .read()
            .ok()
            .and_then(|map| map.get(user_id).cloned());
        Ok(item)
    }
}

//! 多语言短语内存存储实现

use crate::error::StorageError;
use crate::models::PhraseRecord;
use crate::traits::LocalePhraseStore;
use crate::validation::ensure_correlation;
use domain::CallContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 多语言短语内存存储
///
/// 以 (locale, phrase_id) 为键，locale 统一小写。
pub struct InMemoryLocalePhraseStore {
    phrases: RwLock<HashMap<(String, i32), String>>,
}

impl InMemoryLocalePhraseStore {
    pub fn new() -> Self {
        Self {
            phrases: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_phrase(
        &self,
        locale: &str,
        phrase_id: i32,
        text: impl Into<String>,
    ) -> Result<(), StorageError> {
        let mut map = self
            .phrases
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.insert((locale.to_ascii_lowercase(), phrase_id), text.into());
        Ok(())
    }
}

impl Default for InMemoryLocalePhraseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LocalePhraseStore for InMemoryLocalePhraseStore {
    async fn get_phrases(
        &self,
        ctx: &CallContext,
        locale: &str,
        phrase_ids: &[i32],
    ) -> Result<Vec<PhraseRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let locale = locale.to_ascii_lowercase();
        let map = self
            .phrases
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let items = phrase_ids
            .iter()
            .filter_map(|id| {
                map.get(&(locale.clone(), *id)).map(|text| PhraseRecord {
                    phrase_id: *id,
                    locale: locale.clone(),
                    text: text.clone(),
                })
            })
            .collect();
        Ok(items)
    }
}

//! 短语解析：请求语言 → 英文 → 缺省文本。

use crate::phrases::PhraseKey;
use domain::CallContext;
use prodmon_storage::{LocalePhraseStore, StorageError};
use std::collections::HashMap;
use std::sync::Arc;

/// 兜底语言。
pub const DEFAULT_LOCALE: &str = "en";

/// 一次请求内解析好的短语表。
#[derive(Debug, Clone, Default)]
pub struct Phrases {
    texts: HashMap<i32, String>,
}

impl Phrases {
    pub fn text(&self, key: PhraseKey) -> String {
        self.text_or(key.id, key.default_text)
    }

    pub fn text_or(&self, id: i32, fallback: &str) -> String {
        self.texts
            .get(&id)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// 基于 storage 的短语解析器。
#[derive(Clone)]
pub struct PhraseResolver {
    store: Arc<dyn LocalePhraseStore>,
}

impl PhraseResolver {
    pub fn new(store: Arc<dyn LocalePhraseStore>) -> Self {
        Self { store }
    }

    /// 批量解析；请求语言缺失的 id 回退到英文。
    pub async fn resolve(
        &self,
        ctx: &CallContext,
        locale: &str,
        ids: &[i32],
    ) -> Result<Phrases, StorageError> {
        let mut texts = HashMap::new();
        if ids.is_empty() {
            return Ok(Phrases { texts });
        }
        for record in self.store.get_phrases(ctx, locale, ids).await? {
            texts.insert(record.phrase_id, record.text);
        }

        if !locale.eq_ignore_ascii_case(DEFAULT_LOCALE) {
            let missing: Vec<i32> = ids
                .iter()
                .copied()
                .filter(|id| !texts.contains_key(id))
                .collect();
            if !missing.is_empty() {
                for record in self
                    .store
                    .get_phrases(ctx, DEFAULT_LOCALE, &missing)
                    .await?
                {
                    texts.entry(record.phrase_id).or_insert(record.text);
                }
            }
        }

        Ok(Phrases { texts })
    }
}

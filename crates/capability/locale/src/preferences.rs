//! 用户展示偏好解析。

use domain::{CallContext, Preferences};
use prodmon_storage::UserPreferenceStore;
use std::sync::Arc;
use tracing::warn;

/// 基于 storage 的偏好解析器，缺省值来自应用配置。
#[derive(Clone)]
pub struct PreferenceResolver {
    store: Arc<dyn UserPreferenceStore>,
    defaults: Preferences,
}

impl PreferenceResolver {
    pub fn new(store: Arc<dyn UserPreferenceStore>, defaults: Preferences) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &Preferences {
        &self.defaults
    }

    /// 有存储偏好时使用存储值，否则（含查询失败）使用缺省值。
    pub async fn resolve(&self, ctx: &CallContext, user_id: Option<&str>) -> Preferences {
        let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) else {
            return self.defaults.clone();
        };
        match self.store.find_preferences(ctx, user_id).await {
            Ok(Some(record)) => Preferences {
                locale: record.locale,
                unit_system: record.unit_system,
            },
            Ok(None) => self.defaults.clone(),
            Err(err) => {
                warn!(
                    correlation_id = %ctx.correlation_id,
                    user_id = %user_id,
                    error = %err,
                    "preference lookup failed, using defaults"
                );
                self.defaults.clone()
            }
        }
    }
}

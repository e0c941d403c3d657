//! 分组状态内存存储实现
//!
//! 功能：
//! - 视图与列定义
//! - 分组成员
//! - 各来源（公共字段、寄存器、设施标签、参数标准、公式）批量取值

use crate::error::StorageError;
use crate::models::{
    AssetRecord, FacilityTagValueRecord, FormulaRecord, NodeSummaryRecord,
    ParamStandardValueRecord, ParameterValueRecord, ViewColumnRecord, ViewRecord,
};
use crate::traits::GroupStatusStore;
use crate::validation::ensure_correlation;
use domain::CallContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 分组状态内存存储
pub struct InMemoryGroupStatusStore {
    views: RwLock<HashMap<String, ViewRecord>>,
    columns: RwLock<Vec<ViewColumnRecord>>,
    groups: RwLock<HashMap<String, Vec<AssetRecord>>>,
    summaries: RwLock<HashMap<String, NodeSummaryRecord>>,
    parameters: RwLock<Vec<ParameterValueRecord>>,
    facility_tags: RwLock<Vec<FacilityTagValueRecord>>,
    param_standards: RwLock<Vec<ParamStandardValueRecord>>,
    formulas: RwLock<HashMap<i32, FormulaRecord>>,
}

impl InMemoryGroupStatusStore {
    pub fn new() -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            columns: RwLock::new(Vec::new()),
            groups: RwLock::new(HashMap::new()),
            summaries: RwLock::new(HashMap::new()),
            parameters: RwLock::new(Vec::new()),
            facility_tags: RwLock::new(Vec::new()),
            param_standards: RwLock::new(Vec::new()),
            formulas: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_view(&self, record: ViewRecord) -> Result<(), StorageError> {
        let mut map = self
            .views
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        if map.contains_key(&record.view_id) {
            return Err(StorageError::Duplicate("view"));
        }
        map.insert(record.view_id.clone(), record);
        Ok(())
    }

    pub fn insert_column(&self, record: ViewColumnRecord) -> Result<(), StorageError> {
        self.columns
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    /// 将资产加入分组（分组不存在时创建）
    pub fn add_group_member(&self, group_name: &str, asset: AssetRecord) -> Result<(), StorageError> {
        let mut map = self
            .groups
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.entry(group_name.to_string()).or_default().push(asset);
        Ok(())
    }

    pub fn upsert_summary(&self, record: NodeSummaryRecord) -> Result<(), StorageError> {
        let mut map = self
            .summaries
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.insert(record.node_id.clone(), record);
        Ok(())
    }

    pub fn insert_parameter_value(&self, record: ParameterValueRecord) -> Result<(), StorageError> {
        self.parameters
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_facility_tag_value(
        &self,
        record: FacilityTagValueRecord,
    ) -> Result<(), StorageError> {
        self.facility_tags
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_param_standard_value(
        &self,
        record: ParamStandardValueRecord,
    ) -> Result<(), StorageError> {
        self.param_standards
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .push(record);
        Ok(())
    }

    pub fn insert_formula(&self, record: FormulaRecord) -> Result<(), StorageError> {
        let mut map = self
            .formulas
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        map.insert(record.formula_id, record);
        Ok(())
    }
}

impl Default for InMemoryGroupStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GroupStatusStore for InMemoryGroupStatusStore {
    async fn list_views(
        &self,
        ctx: &CallContext,
        user_id: &str,
    ) -> Result<Vec<ViewRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let mut items: Vec<ViewRecord> = self
            .views
            .read()
            .map(|map| {
                map.values()
                    .filter(|item| {
                        item.is_global || item.owner_user_id.as_deref() == Some(user_id)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_view(
        &self,
        ctx: &CallContext,
        view_id: &str,
    ) -> Result<Option<ViewRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let item = self
            .views
            .read()
            .ok()
            .and_then(|map| map.get(view_id).cloned());
        Ok(item)
    }

    async fn list_view_columns(
        &self,
        ctx: &CallContext,
        view_id: &str,
    ) -> Result<Vec<ViewColumnRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .columns
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| item.view_id == view_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn list_group_assets(
        &self,
        ctx: &CallContext,
        group_name: &str,
    ) -> Result<Vec<AssetRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .groups
            .read()
            .ok()
            .and_then(|map| map.get(group_name).cloned())
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_node_summaries(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
    ) -> Result<Vec<NodeSummaryRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let map = self
            .summaries
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(node_ids
            .iter()
            .filter_map(|node_id| map.get(node_id).cloned())
            .collect())
    }

    async fn get_parameter_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        addresses: &[i32],
    ) -> Result<Vec<ParameterValueRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .parameters
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| {
                        node_ids.contains(&item.node_id) && addresses.contains(&item.address)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_facility_tag_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        tag_names: &[String],
    ) -> Result<Vec<FacilityTagValueRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .facility_tags
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| {
                        node_ids.contains(&item.node_id) && tag_names.contains(&item.tag_name)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_param_standard_values(
        &self,
        ctx: &CallContext,
        node_ids: &[String],
        param_standard_types: &[i32],
    ) -> Result<Vec<ParamStandardValueRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let items = self
            .param_standards
            .read()
            .map(|list| {
                list.iter()
                    .filter(|item| {
                        node_ids.contains(&item.node_id)
                            && param_standard_types.contains(&item.param_standard_type)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn get_formulas(
        &self,
        ctx: &CallContext,
        formula_ids: &[i32],
    ) -> Result<Vec<FormulaRecord>, StorageError> {
        ensure_correlation(ctx)?;
        let map = self
            .formulas
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(formula_ids
            .iter()
            .filter_map(|id| map.get(id).cloned())
            .collect())
    }
}

//! 趋势与历史数据查询服务。
//!
//! 老井历史按寄存器地址读取关系库，新井按通道名读取时序库。

use api_contract::{
    ServiceResult, TrendDataInput, TrendDataView, TrendItemDto, TrendItemsInput, TrendPointDto,
};
use domain::{CallContext, Preferences, WithCorrelationId};
use prodmon_locale::{PhraseResolver, Phrases, PreferenceResolver, format};
use prodmon_storage::{
    AssetRecord, AssetStore, DataHistorySqlStore, HistoricalStore, StorageError, TimeSeriesStore,
    TrendItemRecord, TrendPointRecord,
};
use prodmon_telemetry::{record_service_failure, record_service_request, record_store_error};
use prodmon_units::UnitConverter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

pub const CORRELATION_REQUIRED: &str = "Correlation id is required.";
pub const PAYLOAD_REQUIRED: &str = "Request payload is required.";
pub const ASSET_ID_REQUIRED: &str = "Asset id is required.";
pub const ASSET_NOT_FOUND: &str = "Asset not found.";
pub const INVALID_RANGE: &str = "Start date must be before end date.";
pub const ITEM_REQUIRED: &str = "Trend item is required.";
pub const ITEM_NOT_FOUND: &str = "Trend item not found.";
pub const LOOKUP_FAILED: &str = "Trend lookup failed.";

/// 趋势查询错误。
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("Asset not found.")]
    AssetNotFound,
    #[error("Trend item not found.")]
    ItemNotFound,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 趋势数据服务。
#[derive(Clone)]
pub struct TrendDataService {
    asset_store: Arc<dyn AssetStore>,
    historical_store: Arc<dyn HistoricalStore>,
    sql_store: Arc<dyn DataHistorySqlStore>,
    time_series_store: Arc<dyn TimeSeriesStore>,
    phrases: PhraseResolver,
    preferences: PreferenceResolver,
    units: UnitConverter,
}

impl TrendDataService {
    pub fn new(
        asset_store: Arc<dyn AssetStore>,
        historical_store: Arc<dyn HistoricalStore>,
        sql_store: Arc<dyn DataHistorySqlStore>,
        time_series_store: Arc<dyn TimeSeriesStore>,
        phrases: PhraseResolver,
        preferences: PreferenceResolver,
        units: UnitConverter,
    ) -> Self {
        Self {
            asset_store,
            historical_store,
            sql_store,
            time_series_store,
            phrases,
            preferences,
            units,
        }
    }

    /// 列出资产可绘制的趋势项（按名称排序）。
    pub async fn get_trend_items(
        &self,
        input: WithCorrelationId<TrendItemsInput>,
    ) -> ServiceResult<Vec<TrendItemDto>> {
        record_service_request();
        let correlation_id = input.correlation_id;
        if correlation_id.trim().is_empty() {
            return reject(&correlation_id, CORRELATION_REQUIRED);
        }
        let Some(request) = input.value else {
            return reject(&correlation_id, PAYLOAD_REQUIRED);
        };
        if request.asset_id.is_nil() {
            return reject(&correlation_id, ASSET_ID_REQUIRED);
        }
        let ctx = CallContext::new(correlation_id.clone(), request.user_id.clone());
        match self.list_items(&ctx, &request).await {
            Ok(items) => {
                info!(
                    target: "prodmon.trend",
                    correlation_id = %correlation_id,
                    asset_id = %request.asset_id,
                    items = items.len(),
                    "trend_items_listed"
                );
                ServiceResult::success(correlation_id, items)
            }
            Err(err) => fail(&correlation_id, err),
        }
    }

    /// 查询单个趋势项在 `[start, end)` 内的历史点。
    pub async fn get_trend_data(
        &self,
        input: WithCorrelationId<TrendDataInput>,
    ) -> ServiceResult<TrendDataView> {
        record_service_request();
        let correlation_id = input.correlation_id;
        if correlation_id.trim().is_empty() {
            return reject(&correlation_id, CORRELATION_REQUIRED);
        }
        let Some(request) = input.value else {
            return reject(&correlation_id, PAYLOAD_REQUIRED);
        };
        if request.asset_id.is_nil() {
            return reject(&correlation_id, ASSET_ID_REQUIRED);
        }
        if request.start_ms >= request.end_ms {
            return reject(&correlation_id, INVALID_RANGE);
        }
        if request.item_key.trim().is_empty() {
            return reject(&correlation_id, ITEM_REQUIRED);
        }
        let ctx = CallContext::new(correlation_id.clone(), request.user_id.clone());
        match self.load_data(&ctx, &request).await {
            Ok(view) => {
                info!(
                    target: "prodmon.trend",
                    correlation_id = %correlation_id,
                    asset_id = %request.asset_id,
                    key = %view.key,
                    points = view.points.len(),
                    "trend_data_loaded"
                );
                ServiceResult::success(correlation_id, view)
            }
            Err(err) => fail(&correlation_id, err),
        }
    }

    async fn find_asset(
        &self,
        ctx: &CallContext,
        asset_id: Uuid,
        customer_id: Uuid,
    ) -> Result<AssetRecord, TrendError> {
        self.asset_store
            .find_asset(ctx, asset_id, customer_id)
            .await?
            .ok_or(TrendError::AssetNotFound)
    }

    async fn resolve_names(
        &self,
        ctx: &CallContext,
        preferences: &Preferences,
        items: &[TrendItemRecord],
    ) -> Result<Phrases, TrendError> {
        let ids: Vec<i32> = items.iter().filter_map(|item| item.phrase_id).collect();
        Ok(self.phrases.resolve(ctx, &preferences.locale, &ids).await?)
    }

    async fn list_items(
        &self,
        ctx: &CallContext,
        request: &TrendItemsInput,
    ) -> Result<Vec<TrendItemDto>, TrendError> {
        let asset = self
            .find_asset(ctx, request.asset_id, request.customer_id)
            .await?;
        let items = self
            .historical_store
            .list_trend_items(ctx, asset.asset_id)
            .await?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;
        let texts = self.resolve_names(ctx, &preferences, &items).await?;

        let mut dtos: Vec<TrendItemDto> = items
            .iter()
            .map(|item| TrendItemDto {
                key: item.key.clone(),
                name: item_name(&texts, item),
                unit: self
                    .units
                    .target_unit(item.unit, preferences.unit_system)
                    .symbol()
                    .to_string(),
            })
            .collect();
        dtos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(dtos)
    }

    async fn load_data(
        &self,
        ctx: &CallContext,
        request: &TrendDataInput,
    ) -> Result<TrendDataView, TrendError> {
        let asset = self
            .find_asset(ctx, request.asset_id, request.customer_id)
            .await?;
        let item = self
            .historical_store
            .list_trend_items(ctx, asset.asset_id)
            .await?
            .into_iter()
            .find(|item| item.key == request.item_key.trim())
            .ok_or(TrendError::ItemNotFound)?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;
        let texts = self
            .resolve_names(ctx, &preferences, std::slice::from_ref(&item))
            .await?;

        let raw = self
            .read_history(ctx, &asset, &item, request.start_ms, request.end_ms)
            .await?;
        let points = collapse(raw)
            .into_iter()
            .map(|(ts_ms, value)| {
                let shown =
                    self.units
                        .display(Some(value), item.unit, preferences.unit_system, item.decimals);
                TrendPointDto {
                    timestamp: format::timestamp(ts_ms).unwrap_or_default(),
                    ts_ms,
                    value: shown.value.unwrap_or(value),
                }
            })
            .collect();

        Ok(TrendDataView {
            asset_id: asset.asset_id.to_string(),
            key: item.key.clone(),
            name: item_name(&texts, &item),
            unit: self
                .units
                .target_unit(item.unit, preferences.unit_system)
                .symbol()
                .to_string(),
            points,
        })
    }

    /// 老井读关系库，新井读时序库；缺少对应来源键时无数据。
    async fn read_history(
        &self,
        ctx: &CallContext,
        asset: &AssetRecord,
        item: &TrendItemRecord,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Vec<TrendPointRecord>, StorageError> {
        if asset.is_legacy {
            let Some(address) = item.address else {
                return Ok(Vec::new());
            };
            return self
                .sql_store
                .get_parameter_history(ctx, &asset.node_id, address, from_ms, to_ms)
                .await;
        }
        let Some(channel) = item.channel.as_deref() else {
            return Ok(Vec::new());
        };
        let points = self
            .time_series_store
            .get_channel_points(ctx, &[asset.asset_id], channel, from_ms, to_ms)
            .await?;
        Ok(points
            .into_iter()
            .map(|point| TrendPointRecord {
                ts_ms: point.ts_ms,
                value: point.value,
            })
            .collect())
    }
}

fn item_name(texts: &Phrases, item: &TrendItemRecord) -> String {
    match item.phrase_id {
        Some(id) => texts.text_or(id, &item.description),
        None => item.description.clone(),
    }
}

/// 按时间升序，同一时间戳后写入者覆盖。
fn collapse(points: Vec<TrendPointRecord>) -> BTreeMap<i64, f64> {
    points
        .into_iter()
        .map(|point| (point.ts_ms, point.value))
        .collect()
}

fn reject<T>(correlation_id: &str, message: &str) -> ServiceResult<T> {
    record_service_failure();
    info!(
        target: "prodmon.trend",
        correlation_id = %correlation_id,
        reason = message,
        "trend_rejected"
    );
    ServiceResult::failure(correlation_id, message)
}

fn fail<T>(correlation_id: &str, err: TrendError) -> ServiceResult<T> {
    match err {
        TrendError::Storage(inner) => {
            record_store_error();
            error!(
                target: "prodmon.trend",
                correlation_id = %correlation_id,
                error = %inner,
                "trend_lookup_failed"
            );
            reject(correlation_id, LOOKUP_FAILED)
        }
        other => reject(correlation_id, &other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::collapse;
    use prodmon_storage::TrendPointRecord;

    #[test]
    fn collapse_sorts_and_keeps_last_duplicate() {
        let points = vec![
            TrendPointRecord { ts_ms: 30, value: 3.0 },
            TrendPointRecord { ts_ms: 10, value: 1.0 },
            TrendPointRecord { ts_ms: 30, value: 4.0 },
        ];
        let collapsed: Vec<(i64, f64)> = collapse(points).into_iter().collect();
        assert_eq!(collapsed, vec![(10, 1.0), (30, 4.0)]);
    }
}

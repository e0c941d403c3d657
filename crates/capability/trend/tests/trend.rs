use api_contract::{TrendDataInput, TrendItemsInput};
use async_trait::async_trait;
use domain::{CallContext, IndustryApplication, Preferences, Unit, UnitSystem, WithCorrelationId};
use prodmon_locale::{PhraseResolver, PreferenceResolver};
use prodmon_storage::{
    AssetRecord, ChannelPointRecord, DailyHistoryRecord, DailyMetric, DataHistorySqlStore,
    InMemoryAssetStore, InMemoryDataHistorySqlStore, InMemoryHistoricalStore,
    InMemoryLocalePhraseStore, InMemoryTimeSeriesStore, InMemoryUserPreferenceStore,
    StorageError, TrendItemRecord, TrendPointRecord, UserPreferenceRecord,
};
use prodmon_telemetry::metrics;
use prodmon_trend::{INVALID_RANGE, ITEM_NOT_FOUND, ITEM_REQUIRED, LOOKUP_FAILED, TrendDataService};
use prodmon_units::UnitConverter;
use std::sync::Arc;
use uuid::Uuid;

const HOUR: i64 = 3_600_000;
const T0: i64 = 1_700_000_000_000;

struct Fixture {
    service: TrendDataService,
    customer_id: Uuid,
    legacy_id: Uuid,
    modern_id: Uuid,
}

fn item(asset_id: Uuid, key: &str, description: &str, phrase_id: Option<i32>) -> TrendItemRecord {
    TrendItemRecord {
        asset_id,
        key: key.to_string(),
        phrase_id,
        description: description.to_string(),
        unit: Unit::Psi,
        decimals: 1,
        address: Some(2001),
        channel: Some("casing_pressure".to_string()),
    }
}

fn fixture() -> Fixture {
    build_fixture(None)
}

/// `sql_store` 替换老井历史库。
fn build_fixture(sql_store: Option<Arc<dyn DataHistorySqlStore>>) -> Fixture {
    let assets = Arc::new(InMemoryAssetStore::new());
    let catalog = Arc::new(InMemoryHistoricalStore::new());
    let sql = Arc::new(InMemoryDataHistorySqlStore::new());
    let series = Arc::new(InMemoryTimeSeriesStore::new());
    let phrase_store = Arc::new(InMemoryLocalePhraseStore::new());
    let prefs = Arc::new(InMemoryUserPreferenceStore::new());
    let customer_id = Uuid::new_v4();
    let legacy_id = Uuid::new_v4();
    let modern_id = Uuid::new_v4();

    for (asset_id, node_id, is_legacy) in [(legacy_id, "OLD-1", true), (modern_id, "NEW-1", false)] {
        assets
            .insert_asset(AssetRecord {
                asset_id,
                node_id: node_id.to_string(),
                customer_id,
                name: node_id.to_string(),
                application: IndustryApplication::Esp,
                is_legacy,
                enabled: true,
            })
            .expect("asset");
        catalog
            .insert_trend_item(item(asset_id, "cp", "CP raw", Some(9100)))
            .expect("item");
        catalog
            .insert_trend_item(item(asset_id, "tp", "Tubing Pressure", None))
            .expect("item");
    }
    phrase_store.insert_phrase("en", 9100, "Casing Pressure").expect("phrase");

    for (offset, value) in [(2, 120.0), (0, 100.0), (2, 125.0)] {
        sql.insert_parameter_point(
            "OLD-1",
            2001,
            TrendPointRecord {
                ts_ms: T0 + offset * HOUR,
                value,
            },
        )
        .expect("sql point");
    }
    for (offset, value) in [(1, 200.0), (5, 210.0), (30, 999.0)] {
        series
            .insert_point(ChannelPointRecord {
                asset_id: modern_id,
                channel: "casing_pressure".to_string(),
                ts_ms: T0 + offset * HOUR,
                value,
            })
            .expect("series point");
    }
    prefs
        .upsert_preferences(UserPreferenceRecord {
            user_id: "metric".to_string(),
            locale: "en".to_string(),
            unit_system: UnitSystem::Metric,
        })
        .expect("prefs");

    let sql: Arc<dyn DataHistorySqlStore> = match sql_store {
        Some(store) => store,
        None => sql,
    };
    let service = TrendDataService::new(
        assets,
        catalog,
        sql,
        series,
        PhraseResolver::new(phrase_store),
        PreferenceResolver::new(prefs, Preferences::default()),
        UnitConverter::standard(),
    );
    Fixture {
        service,
        customer_id,
        legacy_id,
        modern_id,
    }
}

fn data_input(
    fx: &Fixture,
    asset_id: Uuid,
    key: &str,
    user: Option<&str>,
) -> WithCorrelationId<TrendDataInput> {
    WithCorrelationId::new(
        "corr-t",
        TrendDataInput {
            asset_id,
            customer_id: fx.customer_id,
            item_key: key.to_string(),
            start_ms: T0,
            end_ms: T0 + 24 * HOUR,
            user_id: user.map(str::to_string),
        },
    )
}

#[tokio::test]
async fn items_are_named_and_sorted() {
    let fx = fixture();
    let result = fx
        .service
        .get_trend_items(WithCorrelationId::new(
            "corr-t",
            TrendItemsInput {
                asset_id: fx.legacy_id,
                customer_id: fx.customer_id,
                user_id: Some("metric".to_string()),
            },
        ))
        .await;
    let items = result.value.expect("items");
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Casing Pressure", "Tubing Pressure"]);
    assert_eq!(items[0].unit, "kPa");
}

#[tokio::test]
async fn legacy_wells_read_relational_history() {
    let fx = fixture();
    let view = fx
        .service
        .get_trend_data(data_input(&fx, fx.legacy_id, "cp", None))
        .await
        .value
        .expect("view");
    assert_eq!(view.name, "Casing Pressure");
    assert_eq!(view.unit, "psi");
    let points: Vec<(i64, f64)> = view.points.iter().map(|p| (p.ts_ms, p.value)).collect();
    assert_eq!(points, vec![(T0, 100.0), (T0 + 2 * HOUR, 125.0)]);
    assert_eq!(view.points[0].timestamp, "2023-11-14 22:13:20");
}

#[tokio::test]
async fn modern_wells_read_time_series_in_window() {
    let fx = fixture();
    let view = fx
        .service
        .get_trend_data(data_input(&fx, fx.modern_id, "cp", Some("metric")))
        .await
        .value
        .expect("view");
    assert_eq!(view.unit, "kPa");
    let values: Vec<f64> = view.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1_379.0, 1_447.9]);
}

#[tokio::test]
async fn trend_data_validation() {
    let fx = fixture();

    let mut reversed = data_input(&fx, fx.legacy_id, "cp", None);
    if let Some(value) = reversed.value.as_mut() {
        value.end_ms = value.start_ms;
    }
    let result = fx.service.get_trend_data(reversed).await;
    assert_eq!(result.message.as_deref(), Some(INVALID_RANGE));

    let result = fx
        .service
        .get_trend_data(data_input(&fx, fx.legacy_id, " ", None))
        .await;
    assert_eq!(result.message.as_deref(), Some(ITEM_REQUIRED));

    let result = fx
        .service
        .get_trend_data(data_input(&fx, fx.legacy_id, "gas_rate", None))
        .await;
    assert!(!result.status);
    assert_eq!(result.message.as_deref(), Some(ITEM_NOT_FOUND));
}

/// 关系库连接失败。
struct UnavailableSqlStore;

#[async_trait]
impl DataHistorySqlStore for UnavailableSqlStore {
    async fn get_parameter_history(
        &self,
        _ctx: &CallContext,
        _node_id: &str,
        _address: i32,
        _from_ms: i64,
        _to_ms: i64,
    ) -> Result<Vec<TrendPointRecord>, StorageError> {
        Err(StorageError::backend("login failed for user 'history_reader'"))
    }

    async fn get_daily_history(
        &self,
        _ctx: &CallContext,
        _node_ids: &[String],
        _metric: DailyMetric,
        _from_ms: i64,
        _to_ms: i64,
    ) -> Result<Vec<DailyHistoryRecord>, StorageError> {
        Err(StorageError::backend("login failed for user 'history_reader'"))
    }
}

#[tokio::test]
async fn store_failures_are_reported_without_details() {
    let fx = build_fixture(Some(Arc::new(UnavailableSqlStore)));
    let before = metrics().snapshot().store_errors;

    let result = fx
        .service
        .get_trend_data(data_input(&fx, fx.legacy_id, "cp", None))
        .await;
    assert!(!result.status);
    assert!(result.value.is_none());
    assert_eq!(result.correlation_id, "corr-t");
    assert_eq!(result.message.as_deref(), Some(LOOKUP_FAILED));
    assert!(metrics().snapshot().store_errors > before);

    // 新井走时序库，不受影响
    let modern = fx
        .service
        .get_trend_data(data_input(&fx, fx.modern_id, "cp", None))
        .await;
    assert!(modern.status);
}

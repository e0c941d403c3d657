use api_contract::AssetStatusInput;
use async_trait::async_trait;
use domain::{CallContext, IndustryApplication, Preferences, Unit, UnitSystem, WithCorrelationId};
use prodmon_asset_status::{
    ASSET_ID_REQUIRED, ASSET_NOT_FOUND, AssetStatusService, CORRELATION_REQUIRED, LOOKUP_FAILED,
    PAYLOAD_REQUIRED,
};
use prodmon_locale::{PhraseResolver, PreferenceResolver, phrases};
use prodmon_storage::{
    AlarmRecord, AlarmState, AssetRecord, AssetStatusRecord, AssetStore, ExceptionRecord,
    InMemoryAssetStore, InMemoryLocalePhraseStore, InMemoryUserPreferenceStore,
    StatusRegisterRecord, StorageError, UserPreferenceRecord,
};
use prodmon_telemetry::metrics;
use prodmon_units::UnitConverter;
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    service: AssetStatusService,
    assets: Arc<InMemoryAssetStore>,
    asset_id: Uuid,
    customer_id: Uuid,
}

fn fixture() -> Fixture {
    let assets = Arc::new(InMemoryAssetStore::new());
    let phrase_store = Arc::new(InMemoryLocalePhraseStore::new());
    let prefs = Arc::new(InMemoryUserPreferenceStore::new());
    let asset_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();

    assets
        .insert_asset(AssetRecord {
            asset_id,
            node_id: "WELL-001".to_string(),
            customer_id,
            name: "Ranch 12-4H".to_string(),
            application: IndustryApplication::RodLift,
            is_legacy: false,
            enabled: true,
        })
        .expect("asset");
    phrase_store
        .insert_phrase("es", phrases::ROD_LIFT.id, "Bombeo Mecánico")
        .expect("phrase");
    phrase_store.insert_phrase("en", 9001, "Casing Pressure").expect("phrase");
    prefs
        .upsert_preferences(UserPreferenceRecord {
            user_id: "metric".to_string(),
            locale: "es".to_string(),
            unit_system: UnitSystem::Metric,
        })
        .expect("prefs");

    let service = AssetStatusService::new(
        assets.clone(),
        PhraseResolver::new(phrase_store),
        PreferenceResolver::new(prefs, Preferences::default()),
        UnitConverter::standard(),
    );
    Fixture {
        service,
        assets,
        asset_id,
        customer_id,
    }
}

fn seed_status(fx: &Fixture) {
    fx.assets
        .upsert_status(AssetStatusRecord {
            asset_id: fx.asset_id,
            run_status: Some("Running".to_string()),
            comm_status: Some("OK".to_string()),
            last_good_scan_ms: Some(1_700_000_000_000),
            time_in_state_minutes: Some(1_565),
            today_runtime_pct: Some(85.04),
            yesterday_runtime_pct: Some(100.0),
            operational_score: Some(92.0),
            registers: vec![
                StatusRegisterRecord {
                    address: 2001,
                    phrase_id: Some(9001),
                    description: "CP".to_string(),
                    value: 100.0,
                    unit: Unit::Psi,
                    decimals: 1,
                },
                StatusRegisterRecord {
                    address: 2002,
                    phrase_id: None,
                    description: "Motor Temp".to_string(),
                    value: 212.0,
                    unit: Unit::Fahrenheit,
                    decimals: 0,
                },
            ],
        })
        .expect("status");
    for (priority, raised, state) in [
        (1, 1_700_000_000_000, AlarmState::Active),
        (5, 1_700_000_100_000, AlarmState::Acknowledged),
        (5, 1_700_000_200_000, AlarmState::Active),
    ] {
        fx.assets
            .insert_alarm(AlarmRecord {
                node_id: "WELL-001".to_string(),
                address: 3000 + priority,
                description: format!("alarm p{priority}"),
                priority,
                state,
                raised_at_ms: Some(raised),
            })
            .expect("alarm");
    }
    for priority in [2, 9] {
        fx.assets
            .insert_exception(ExceptionRecord {
                node_id: "WELL-001".to_string(),
                description: format!("exception p{priority}"),
                priority,
            })
            .expect("exception");
    }
}

fn input(fx: &Fixture, user_id: Option<&str>) -> WithCorrelationId<AssetStatusInput> {
    WithCorrelationId::new(
        "corr-1",
        AssetStatusInput {
            asset_id: fx.asset_id,
            customer_id: fx.customer_id,
            user_id: user_id.map(str::to_string),
        },
    )
}

#[tokio::test]
async fn builds_view_with_imperial_defaults() {
    let fx = fixture();
    seed_status(&fx);

    let result = fx.service.get_asset_status(input(&fx, None)).await;
    assert!(result.status, "{:?}", result.message);
    assert_eq!(result.correlation_id, "corr-1");
    let view = result.value.expect("view");

    assert_eq!(view.well_name, "Ranch 12-4H");
    assert_eq!(view.application, "Rod Lift");
    assert_eq!(view.enabled, "Enabled");
    assert_eq!(view.last_good_scan.as_deref(), Some("2023-11-14 22:13:20"));
    assert_eq!(view.time_in_state.as_deref(), Some("1d 2h 5m"));
    assert_eq!(view.today_runtime.as_deref(), Some("85.0%"));
    assert_eq!(view.operational_score.as_deref(), Some("92"));

    let cp = &view.status_registers[0];
    assert_eq!(cp.label, "Casing Pressure");
    assert_eq!(cp.display_value, "100.0 psi");
    assert_eq!(view.status_registers[1].label, "Motor Temp");

    let priorities: Vec<(i32, &str)> = view
        .alarms
        .iter()
        .map(|a| (a.priority, a.state.as_str()))
        .collect();
    assert_eq!(
        priorities,
        vec![(5, "Active"), (5, "Acknowledged"), (1, "Active")]
    );
    assert_eq!(view.exceptions[0].priority, 9);
}

#[tokio::test]
async fn applies_user_locale_and_units() {
    let fx = fixture();
    seed_status(&fx);

    let view = fx
        .service
        .get_asset_status(input(&fx, Some("metric")))
        .await
        .value
        .expect("view");

    assert_eq!(view.application, "Bombeo Mecánico");
    // 缺少 es 短语时回退英文
    assert_eq!(view.status_registers[0].label, "Casing Pressure");
    assert_eq!(view.status_registers[0].display_value, "689.5 kPa");
    assert_eq!(view.status_registers[0].unit, "kPa");
    assert_eq!(view.status_registers[1].display_value, "100 °C");
}

#[tokio::test]
async fn missing_status_still_returns_view() {
    let fx = fixture();
    let result = fx.service.get_asset_status(input(&fx, None)).await;
    let view = result.value.expect("view");
    assert!(view.run_status.is_none());
    assert!(view.last_good_scan.is_none());
    assert!(view.status_registers.is_empty());
    assert!(view.alarms.is_empty());
}

#[tokio::test]
async fn rejects_invalid_requests() {
    let fx = fixture();

    let result = fx
        .service
        .get_asset_status(WithCorrelationId::empty("corr-2"))
        .await;
    assert!(!result.status);
    assert_eq!(result.message.as_deref(), Some(PAYLOAD_REQUIRED));
    assert_eq!(result.correlation_id, "corr-2");

    let mut nil = input(&fx, None);
    if let Some(value) = nil.value.as_mut() {
        value.asset_id = Uuid::nil();
    }
    let result = fx.service.get_asset_status(nil).await;
    assert_eq!(result.message.as_deref(), Some(ASSET_ID_REQUIRED));

    let mut other_customer = input(&fx, None);
    if let Some(value) = other_customer.value.as_mut() {
        value.customer_id = Uuid::new_v4();
    }
    let result = fx.service.get_asset_status(other_customer).await;
    assert_eq!(result.message.as_deref(), Some(ASSET_NOT_FOUND));
    assert!(result.value.is_none());

    let mut blank = input(&fx, None);
    blank.correlation_id = " ".to_string();
    let result = fx.service.get_asset_status(blank).await;
    assert_eq!(result.message.as_deref(), Some(CORRELATION_REQUIRED));
}

/// 所有查询都失败的资产存储。
struct UnavailableAssetStore;

#[async_trait]
impl AssetStore for UnavailableAssetStore {
    async fn find_asset(
        &self,
        _ctx: &CallContext,
        _asset_id: Uuid,
        _customer_id: Uuid,
    ) -> Result<Option<AssetRecord>, StorageError> {
        Err(StorageError::backend("connection refused: asset db"))
    }

    async fn get_asset_status(
        &self,
        _ctx: &CallContext,
        _asset_id: Uuid,
    ) -> Result<Option<AssetStatusRecord>, StorageError> {
        Err(StorageError::backend("connection refused: asset db"))
    }

    async fn list_alarms(
        &self,
        _ctx: &CallContext,
        _node_id: &str,
    ) -> Result<Vec<AlarmRecord>, StorageError> {
        Err(StorageError::backend("connection refused: asset db"))
    }

    async fn list_exceptions(
        &self,
        _ctx: &CallContext,
        _node_id: &str,
    ) -> Result<Vec<ExceptionRecord>, StorageError> {
        Err(StorageError::backend("connection refused: asset db"))
    }
}

#[tokio::test]
async fn store_failures_are_reported_without_details() {
    let service = AssetStatusService::new(
        Arc::new(UnavailableAssetStore),
        PhraseResolver::new(Arc::new(InMemoryLocalePhraseStore::new())),
        PreferenceResolver::new(
            Arc::new(InMemoryUserPreferenceStore::new()),
            Preferences::default(),
        ),
        UnitConverter::standard(),
    );
    let before = metrics().snapshot().store_errors;

    let result = service
        .get_asset_status(WithCorrelationId::new(
            "corr-1",
            AssetStatusInput {
                asset_id: Uuid::new_v4(),
                customer_id: Uuid::new_v4(),
                user_id: None,
            },
        ))
        .await;

    assert!(!result.status);
    assert!(result.value.is_none());
    assert_eq!(result.message.as_deref(), Some(LOOKUP_FAILED));
    assert!(metrics().snapshot().store_errors > before);
}

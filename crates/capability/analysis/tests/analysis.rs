use api_contract::AnalysisInput;
use async_trait::async_trait;
use domain::{CallContext, IndustryApplication, Preferences, UnitSystem, WithCorrelationId};
use prodmon_analysis::{
    ANALYSIS_NOT_FOUND, ASSET_NOT_FOUND, AnalysisDeps, EspAnalysisService, GasLiftAnalysisService,
    LOOKUP_FAILED, PAYLOAD_REQUIRED, RodLiftAnalysisService,
};
use prodmon_locale::{PhraseResolver, PreferenceResolver, phrases};
use prodmon_storage::{
    AnalysisStore, AssetRecord, EspAnalysisRecord, GasLiftAnalysisRecord, GasLiftValveRecord,
    InMemoryAnalysisStore, InMemoryAssetStore, InMemoryLocalePhraseStore,
    InMemoryUserPreferenceStore, RodLiftAnalysisRecord, StorageError, UserPreferenceRecord,
    ValveState,
};
use prodmon_telemetry::metrics;
use prodmon_units::UnitConverter;
use std::sync::Arc;
use uuid::Uuid;

const CARD_OLD: i64 = 1_700_000_000_000;
const CARD_NEW: i64 = 1_700_086_400_000;

struct Fixture {
    deps: AnalysisDeps,
    analysis: Arc<InMemoryAnalysisStore>,
    asset_id: Uuid,
    customer_id: Uuid,
}

fn fixture() -> Fixture {
    let assets = Arc::new(InMemoryAssetStore::new());
    let analysis = Arc::new(InMemoryAnalysisStore::new());
    let phrase_store = Arc::new(InMemoryLocalePhraseStore::new());
    let prefs = Arc::new(InMemoryUserPreferenceStore::new());
    let asset_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    assets
        .insert_asset(AssetRecord {
            asset_id,
            node_id: "WELL-007".to_string(),
            customer_id,
            name: "Mesa 7".to_string(),
            application: IndustryApplication::RodLift,
            is_legacy: true,
            enabled: true,
        })
        .expect("asset");
    phrase_store
        .insert_phrase("fr", phrases::PUMP_PARTIAL.id, "Remplissage partiel")
        .expect("phrase");
    prefs
        .upsert_preferences(UserPreferenceRecord {
            user_id: "metric".to_string(),
            locale: "fr".to_string(),
            unit_system: UnitSystem::Metric,
        })
        .expect("prefs");
    let deps = AnalysisDeps::new(
        assets,
        analysis.clone(),
        PhraseResolver::new(phrase_store),
        PreferenceResolver::new(prefs, Preferences::default()),
        UnitConverter::standard(),
    );
    Fixture {
        deps,
        analysis,
        asset_id,
        customer_id,
    }
}

fn input(fx: &Fixture, date_ms: Option<i64>, user: Option<&str>) -> WithCorrelationId<AnalysisInput> {
    WithCorrelationId::new(
        "corr-a",
        AnalysisInput {
            asset_id: fx.asset_id,
            customer_id: fx.customer_id,
            date_ms,
            user_id: user.map(str::to_string),
        },
    )
}

fn seed_rod_lift(fx: &Fixture) {
    for (card_date_ms, fillage) in [(CARD_OLD, 92.0), (CARD_NEW, 72.0)] {
        fx.analysis
            .insert_rod_lift(RodLiftAnalysisRecord {
                asset_id: fx.asset_id,
                card_date_ms,
                pump_depth_ft: Some(5_000.0),
                pump_diameter_in: Some(1.75),
                stroke_length_in: Some(144.0),
                spm: Some(8.5),
                gross_rate_bpd: Some(180.0),
                pump_fillage_pct: Some(fillage),
                pump_efficiency_pct: Some(78.0),
                fluid_level_ft: Some(4_200.0),
                pump_intake_pressure_psi: Some(310.0),
                peak_load_lbs: Some(18_500.0),
                min_load_lbs: Some(6_200.0),
                gearbox_loading_pct: Some(64.0),
                rod_loading_pct: Some(71.5),
                structural_loading_pct: Some(55.0),
            })
            .expect("rod lift");
    }
}

fn find<'a>(fields: &'a [api_contract::PropertyValueDto], key: prodmon_locale::PhraseKey) -> &'a api_contract::PropertyValueDto {
    fields
        .iter()
        .find(|field| field.id == key.id.to_string())
        .expect("field present")
}

#[tokio::test]
async fn rod_lift_uses_latest_card_by_default() {
    let fx = fixture();
    seed_rod_lift(&fx);
    let service = RodLiftAnalysisService::new(fx.deps.clone());

    let view = service
        .get_card_date_analysis(input(&fx, None, None))
        .await
        .value
        .expect("view");
    assert_eq!(view.well_name, "Mesa 7");
    assert_eq!(view.card_date, "2023-11-15 22:13:20");
    assert_eq!(view.pump_condition, "Partial Fillage");

    let above = find(&view.outputs, phrases::FLUID_ABOVE_PUMP);
    assert_eq!(above.label, "Fluid Above Pump");
    assert_eq!(above.value, Some(800.0));
    assert_eq!(above.display_value, "800 ft");
    assert_eq!(view.inputs.len(), 4);
    assert_eq!(view.loading.len(), 5);

    let older = service
        .get_card_date_analysis(input(&fx, Some(CARD_OLD), None))
        .await
        .value
        .expect("view");
    assert_eq!(older.pump_condition, "Full Pump");
}

#[tokio::test]
async fn rod_lift_honours_metric_preferences() {
    let fx = fixture();
    seed_rod_lift(&fx);
    let service = RodLiftAnalysisService::new(fx.deps.clone());

    let view = service
        .get_card_date_analysis(input(&fx, None, Some("metric")))
        .await
        .value
        .expect("view");
    assert_eq!(view.pump_condition, "Remplissage partiel");
    assert_eq!(find(&view.outputs, phrases::FLUID_ABOVE_PUMP).display_value, "244 m");
    assert_eq!(find(&view.inputs, phrases::STROKE_LENGTH).unit, "mm");
    assert_eq!(find(&view.outputs, phrases::PUMP_FILLAGE).display_value, "72.0%");
}

#[tokio::test]
async fn esp_reports_region_and_differential() {
    let fx = fixture();
    fx.analysis
        .insert_esp(EspAnalysisRecord {
            asset_id: fx.asset_id,
            test_date_ms: CARD_OLD,
            pump_name: Some("REDA D1050N".to_string()),
            stage_count: Some(120),
            pump_intake_pressure_psi: Some(350.0),
            discharge_pressure_psi: Some(2_350.0),
            flow_rate_bpd: Some(1_700.0),
            recommended_min_rate_bpd: Some(800.0),
            recommended_max_rate_bpd: Some(1_600.0),
            ..Default::default()
        })
        .expect("esp");
    let service = EspAnalysisService::new(fx.deps.clone());

    let view = service
        .get_esp_analysis(input(&fx, None, None))
        .await
        .value
        .expect("view");
    assert_eq!(view.operating_region, "Upthrust");
    assert_eq!(view.pump_name.as_deref(), Some("REDA D1050N"));
    assert_eq!(
        find(&view.values, phrases::PUMP_DIFFERENTIAL).display_value,
        "2000.0 psi"
    );
    assert_eq!(find(&view.values, phrases::STAGE_COUNT).display_value, "120");
    let head = find(&view.values, phrases::HEAD);
    assert!(head.value.is_none());
    assert_eq!(head.display_value, "");
}

#[tokio::test]
async fn gas_lift_sorts_valves_and_finds_injection_point() {
    let fx = fixture();
    let valve = |number, depth_ft, state| GasLiftValveRecord {
        number,
        depth_ft,
        port_size_in: Some(0.25),
        test_rack_opening_psi: Some(950.0),
        state,
    };
    fx.analysis
        .insert_gas_lift(GasLiftAnalysisRecord {
            asset_id: fx.asset_id,
            test_date_ms: CARD_OLD,
            injection_rate_mcfd: Some(500.0),
            gross_rate_bpd: Some(250.0),
            tubing_pressure_psi: Some(180.0),
            valves: vec![
                valve(3, 6_400.0, ValveState::Closed),
                valve(1, 2_100.0, ValveState::Closed),
                valve(2, 4_300.0, ValveState::Injecting),
            ],
            ..Default::default()
        })
        .expect("gas lift");
    let service = GasLiftAnalysisService::new(fx.deps.clone());

    let view = service
        .get_gas_lift_analysis(input(&fx, None, None))
        .await
        .value
        .expect("view");
    let order: Vec<u32> = view.valves.iter().map(|v| v.number).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(view.valves[1].state, "Injecting");
    assert_eq!(view.valves[0].depth, "2100 ft");
    assert_eq!(view.injecting_valve, Some(2));
    assert!(!view.injecting_at_deepest_valve);
    assert_eq!(
        find(&view.values, phrases::INJECTION_GLR).display_value,
        "2000 scf/bbl"
    );
}

#[tokio::test]
async fn gas_lift_omits_glr_without_production() {
    let fx = fixture();
    fx.analysis
        .insert_gas_lift(GasLiftAnalysisRecord {
            asset_id: fx.asset_id,
            test_date_ms: CARD_OLD,
            injection_rate_mcfd: Some(500.0),
            gross_rate_bpd: Some(0.0),
            valves: vec![GasLiftValveRecord {
                number: 1,
                depth_ft: 3_000.0,
                port_size_in: None,
                test_rack_opening_psi: None,
                state: ValveState::Injecting,
            }],
            ..Default::default()
        })
        .expect("gas lift");
    let view = GasLiftAnalysisService::new(fx.deps.clone())
        .get_gas_lift_analysis(input(&fx, None, None))
        .await
        .value
        .expect("view");
    assert!(
        view.values
            .iter()
            .all(|field| field.id != phrases::INJECTION_GLR.id.to_string())
    );
    assert!(view.injecting_at_deepest_valve);
    assert_eq!(view.valves[0].port_size, "");
}

#[tokio::test]
async fn analysis_failures_are_reported() {
    let fx = fixture();
    let rod = RodLiftAnalysisService::new(fx.deps.clone());

    let result = rod.get_card_date_analysis(input(&fx, None, None)).await;
    assert!(!result.status);
    assert_eq!(result.message.as_deref(), Some(ANALYSIS_NOT_FOUND));

    let result = rod
        .get_card_date_analysis(WithCorrelationId::empty("corr-b"))
        .await;
    assert_eq!(result.message.as_deref(), Some(PAYLOAD_REQUIRED));
    assert_eq!(result.correlation_id, "corr-b");

    let mut foreign = input(&fx, None, None);
    if let Some(value) = foreign.value.as_mut() {
        value.customer_id = Uuid::new_v4();
    }
    let result = EspAnalysisService::new(fx.deps.clone())
        .get_esp_analysis(foreign)
        .await;
    assert_eq!(result.message.as_deref(), Some(ASSET_NOT_FOUND));
}

/// 分析结果库不可用。
struct UnavailableAnalysisStore;

#[async_trait]
impl AnalysisStore for UnavailableAnalysisStore {
    async fn get_rod_lift_analysis(
        &self,
        _ctx: &CallContext,
        _asset_id: Uuid,
        _card_date_ms: Option<i64>,
    ) -> Result<Option<RodLiftAnalysisRecord>, StorageError> {
        Err(StorageError::backend("timeout reading xdiag results"))
    }

    async fn get_esp_analysis(
        &self,
        _ctx: &CallContext,
        _asset_id: Uuid,
        _test_date_ms: Option<i64>,
    ) -> Result<Option<EspAnalysisRecord>, StorageError> {
        Err(StorageError::backend("timeout reading esp results"))
    }

    async fn get_gas_lift_analysis(
        &self,
        _ctx: &CallContext,
        _asset_id: Uuid,
        _test_date_ms: Option<i64>,
    ) -> Result<Option<GasLiftAnalysisRecord>, StorageError> {
        Err(StorageError::backend("timeout reading gas lift results"))
    }
}

#[tokio::test]
async fn store_failures_are_reported_without_details() {
    let fx = fixture();
    let assets = Arc::new(InMemoryAssetStore::new());
    assets
        .insert_asset(AssetRecord {
            asset_id: fx.asset_id,
            node_id: "WELL-007".to_string(),
            customer_id: fx.customer_id,
            name: "Mesa 7".to_string(),
            application: IndustryApplication::RodLift,
            is_legacy: true,
            enabled: true,
        })
        .expect("asset");
    let deps = AnalysisDeps::new(
        assets,
        Arc::new(UnavailableAnalysisStore),
        PhraseResolver::new(Arc::new(InMemoryLocalePhraseStore::new())),
        PreferenceResolver::new(
            Arc::new(InMemoryUserPreferenceStore::new()),
            Preferences::default(),
        ),
        UnitConverter::standard(),
    );
    let before = metrics().snapshot().store_errors;

    let rod = RodLiftAnalysisService::new(deps.clone())
        .get_card_date_analysis(input(&fx, None, None))
        .await;
    let esp = EspAnalysisService::new(deps.clone())
        .get_esp_analysis(input(&fx, None, None))
        .await;
    let gas_lift = GasLiftAnalysisService::new(deps)
        .get_gas_lift_analysis(input(&fx, None, None))
        .await;

    for (status, message, has_value) in [
        (rod.status, rod.message, rod.value.is_some()),
        (esp.status, esp.message, esp.value.is_some()),
        (gas_lift.status, gas_lift.message, gas_lift.value.is_some()),
    ] {
        assert!(!status);
        assert!(!has_value);
        assert_eq!(message.as_deref(), Some(LOOKUP_FAILED));
    }
    assert!(metrics().snapshot().store_errors >= before + 3);
}

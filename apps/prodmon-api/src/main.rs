//! 生产监控 HTTP API：单井状态、举升分析、分组状态表格与趋势查询。

mod handlers;
mod middleware;
mod routes;
mod seed;
mod utils;

use domain::Preferences;
use prodmon_analysis::{
    AnalysisDeps, EspAnalysisService, GasLiftAnalysisService, RodLiftAnalysisService,
};
use prodmon_asset_status::AssetStatusService;
use prodmon_config::AppConfig;
use prodmon_group_status::{DowntimeConfig, GroupStatusProcessingService};
use prodmon_locale::{PhraseResolver, PreferenceResolver};
use prodmon_storage::{
    InMemoryAnalysisStore, InMemoryAssetStore, InMemoryDataHistorySqlStore,
    InMemoryGroupStatusStore, InMemoryHistoricalStore, InMemoryLocalePhraseStore,
    InMemoryTimeSeriesStore, InMemoryUserPreferenceStore,
};
use prodmon_telemetry::init_tracing;
use prodmon_trend::TrendDataService;
use prodmon_units::UnitConverter;
use std::sync::Arc;
use tracing::info;

/// 路由共享状态。
#[derive(Clone)]
pub struct AppState {
    pub asset_status: Arc<AssetStatusService>,
    pub rod_lift: Arc<RodLiftAnalysisService>,
    pub esp: Arc<EspAnalysisService>,
    pub gas_lift: Arc<GasLiftAnalysisService>,
    pub group_status: Arc<GroupStatusProcessingService>,
    pub trend: Arc<TrendDataService>,
}

/// 内存存储集合（演示数据写入入口）。
pub struct InMemoryStores {
    pub assets: Arc<InMemoryAssetStore>,
    pub preferences: Arc<InMemoryUserPreferenceStore>,
    pub phrases: Arc<InMemoryLocalePhraseStore>,
    pub analysis: Arc<InMemoryAnalysisStore>,
    pub historical: Arc<InMemoryHistoricalStore>,
    pub sql: Arc<InMemoryDataHistorySqlStore>,
    pub time_series: Arc<InMemoryTimeSeriesStore>,
    pub groups: Arc<InMemoryGroupStatusStore>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self {
            assets: Arc::new(InMemoryAssetStore::new()),
            preferences: Arc::new(InMemoryUserPreferenceStore::new()),
            phrases: Arc::new(InMemoryLocalePhraseStore::new()),
            analysis: Arc::new(InMemoryAnalysisStore::new()),
            historical: Arc::new(InMemoryHistoricalStore::new()),
            sql: Arc::new(InMemoryDataHistorySqlStore::new()),
            time_series: Arc::new(InMemoryTimeSeriesStore::new()),
            groups: Arc::new(InMemoryGroupStatusStore::new()),
        }
    }
}

impl AppState {
    /// 基于存储集合装配各服务。
    pub fn build(config: &AppConfig, stores: &InMemoryStores) -> Self {
        let phrases = PhraseResolver::new(stores.phrases.clone());
        let preferences = PreferenceResolver::new(
            stores.preferences.clone(),
            Preferences {
                locale: config.default_locale.clone(),
                unit_system: config.default_unit_system,
            },
        );
        let units = UnitConverter::standard();
        let deps = AnalysisDeps::new(
            stores.assets.clone(),
            stores.analysis.clone(),
            phrases.clone(),
            preferences.clone(),
            units.clone(),
        );
        Self {
            asset_status: Arc::new(AssetStatusService::new(
                stores.assets.clone(),
                phrases.clone(),
                preferences.clone(),
                units.clone(),
            )),
            rod_lift: Arc::new(RodLiftAnalysisService::new(deps.clone())),
            esp: Arc::new(EspAnalysisService::new(deps.clone())),
            gas_lift: Arc::new(GasLiftAnalysisService::new(deps)),
            group_status: Arc::new(GroupStatusProcessingService::new(
                stores.groups.clone(),
                stores.sql.clone(),
                stores.time_series.clone(),
                phrases.clone(),
                preferences.clone(),
                units.clone(),
                DowntimeConfig {
                    default_day_count: config.downtime_days,
                    gas_lift_min_injection_mcfd: config.gas_lift_min_injection_mcfd,
                },
            )),
            trend: Arc::new(TrendDataService::new(
                stores.assets.clone(),
                stores.historical.clone(),
                stores.sql.clone(),
                stores.time_series.clone(),
                phrases,
                preferences,
                units,
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let stores = InMemoryStores::new();
    if config.seed_demo {
        seed::seed_demo(&stores)?;
        info!(
            target: "prodmon.api",
            customer_id = %seed::DEMO_CUSTOMER_ID,
            group = seed::DEMO_GROUP,
            "demo_data_seeded"
        );
    }
    let app = routes::build_app(AppState::build(&config, &stores));

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(target: "prodmon.api", addr = %config.http_addr, "http_listening");
    axum::serve(listener, app).await?;
    Ok(())
}

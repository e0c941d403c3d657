//! 单井状态聚合服务。
//!
//! 一次调用组合资产、最新扫描状态、报警与异常，并按用户偏好完成
//! 短语替换与单位换算。

use api_contract::{
    AlarmDto, AssetStatusInput, AssetStatusView, ExceptionDto, PropertyValueDto, ServiceResult,
};
use domain::{CallContext, Preferences, WithCorrelationId};
use prodmon_locale::{PhraseResolver, Phrases, PreferenceResolver, format, phrases};
use prodmon_storage::{
    AlarmRecord, AssetRecord, AssetStatusRecord, AssetStore, ExceptionRecord, StorageError,
};
use prodmon_telemetry::{record_service_failure, record_service_request, record_store_error};
use prodmon_units::UnitConverter;
use std::sync::Arc;
use tracing::{error, info};

pub const CORRELATION_REQUIRED: &str = "Correlation id is required.";
pub const PAYLOAD_REQUIRED: &str = "Request payload is required.";
pub const ASSET_ID_REQUIRED: &str = "Asset id is required.";
pub const ASSET_NOT_FOUND: &str = "Asset not found.";
pub const LOOKUP_FAILED: &str = "Asset status lookup failed.";

/// 单井状态服务。
#[derive(Clone)]
pub struct AssetStatusService {
    asset_store: Arc<dyn AssetStore>,
    phrases: PhraseResolver,
    preferences: PreferenceResolver,
    units: UnitConverter,
}

impl AssetStatusService {
    pub fn new(
        asset_store: Arc<dyn AssetStore>,
        phrases: PhraseResolver,
        preferences: PreferenceResolver,
        units: UnitConverter,
    ) -> Self {
        Self {
            asset_store,
            phrases,
            preferences,
            units,
        }
    }

    pub async fn get_asset_status(
        &self,
        input: WithCorrelationId<AssetStatusInput>,
    ) -> ServiceResult<AssetStatusView> {
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
        match self.build_view(&ctx, &request).await {
            Ok(Some(view)) => {
                info!(
                    target: "prodmon.asset_status",
                    correlation_id = %correlation_id,
                    asset_id = %request.asset_id,
                    alarms = view.alarms.len(),
                    registers = view.status_registers.len(),
                    "asset_status_built"
                );
                ServiceResult::success(correlation_id, view)
            }
            Ok(None) => reject(&correlation_id, ASSET_NOT_FOUND),
            Err(err) => {
                record_store_error();
                error!(
                    target: "prodmon.asset_status",
                    correlation_id = %correlation_id,
                    asset_id = %request.asset_id,
                    error = %err,
                    "asset_status_lookup_failed"
                );
                reject(&correlation_id, LOOKUP_FAILED)
            }
        }
    }

    async fn build_view(
        &self,
        ctx: &CallContext,
        request: &AssetStatusInput,
    ) -> Result<Option<AssetStatusView>, StorageError> {
        let Some(asset) = self
            .asset_store
            .find_asset(ctx, request.asset_id, request.customer_id)
            .await?
        else {
            return Ok(None);
        };
        let status = self.asset_store.get_asset_status(ctx, asset.asset_id).await?;
        let alarms = self.asset_store.list_alarms(ctx, &asset.node_id).await?;
        let exceptions = self.asset_store.list_exceptions(ctx, &asset.node_id).await?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;

        let mut ids = phrases::ids(&[
            phrases::application(asset.application),
            phrases::enabled(asset.enabled),
            phrases::ALARM_ACTIVE,
            phrases::ALARM_ACKNOWLEDGED,
            phrases::ALARM_CLEARED,
        ]);
        if let Some(status) = &status {
            ids.extend(status.registers.iter().filter_map(|reg| reg.phrase_id));
        }
        let texts = self
            .phrases
            .resolve(ctx, &preferences.locale, &ids)
            .await?;

        Ok(Some(self.assemble(
            asset,
            status,
            alarms,
            exceptions,
            &texts,
            &preferences,
        )))
    }

    fn assemble(
        &self,
        asset: AssetRecord,
        status: Option<AssetStatusRecord>,
        alarms: Vec<AlarmRecord>,
        exceptions: Vec<ExceptionRecord>,
        texts: &Phrases,
        preferences: &Preferences,
    ) -> AssetStatusView {
        let mut view = AssetStatusView {
            asset_id: asset.asset_id.to_string(),
            node_id: asset.node_id.clone(),
            well_name: asset.name.clone(),
            application: texts.text(phrases::application(asset.application)),
            enabled: texts.text(phrases::enabled(asset.enabled)),
            run_status: None,
            comm_status: None,
            last_good_scan: None,
            time_in_state: None,
            today_runtime: None,
            yesterday_runtime: None,
            operational_score: None,
            status_registers: Vec::new(),
            alarms: alarm_rows(alarms, texts),
            exceptions: exception_rows(exceptions),
        };

        if let Some(status) = status {
            view.run_status = status.run_status;
            view.comm_status = status.comm_status;
            view.last_good_scan = status.last_good_scan_ms.and_then(format::timestamp);
            view.time_in_state = status.time_in_state_minutes.map(format::duration_minutes);
            view.today_runtime = status.today_runtime_pct.map(|v| format::percent(v, 1));
            view.yesterday_runtime = status.yesterday_runtime_pct.map(|v| format::percent(v, 1));
            view.operational_score = status.operational_score.map(|v| format::number(v, 0));
            view.status_registers = status
                .registers
                .into_iter()
                .map(|reg| {
                    let label = match reg.phrase_id {
                        Some(id) => texts.text_or(id, &reg.description),
                        None => reg.description.clone(),
                    };
                    let shown = self.units.display(
                        Some(reg.value),
                        reg.unit,
                        preferences.unit_system,
                        reg.decimals,
                    );
                    PropertyValueDto {
                        id: reg.address.to_string(),
                        label,
                        value: shown.value,
                        display_value: shown.text,
                        unit: shown.unit.symbol().to_string(),
                    }
                })
                .collect();
        }
        view
    }
}

/// 报警按优先级降序，同优先级最新的在前。
fn alarm_rows(mut alarms: Vec<AlarmRecord>, texts: &Phrases) -> Vec<AlarmDto> {
    alarms.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.raised_at_ms.cmp(&a.raised_at_ms))
    });
    alarms
        .into_iter()
        .map(|alarm| AlarmDto {
            address: alarm.address,
            description: alarm.description,
            priority: alarm.priority,
            state: texts.text(phrases::alarm_state(alarm.state)),
            raised_at: alarm.raised_at_ms.and_then(format::timestamp),
        })
        .collect()
}

fn exception_rows(mut exceptions: Vec<ExceptionRecord>) -> Vec<ExceptionDto> {
    exceptions.sort_by(|a, b| b.priority.cmp(&a.priority));
    exceptions
        .into_iter()
        .map(|item| ExceptionDto {
            description: item.description,
            priority: item.priority,
        })
        .collect()
}

fn reject<T>(correlation_id: &str, message: &str) -> ServiceResult<T> {
    record_service_failure();
    info!(
        target: "prodmon.asset_status",
        correlation_id = %correlation_id,
        reason = message,
        "asset_status_rejected"
    );
    ServiceResult::failure(correlation_id, message)
}

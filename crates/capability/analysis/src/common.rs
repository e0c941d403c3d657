use api_contract::{AnalysisInput, PropertyValueDto, ServiceResult};
use domain::{CallContext, Preferences, Unit, UnitSystem, WithCorrelationId};
use prodmon_locale::{PhraseKey, PhraseResolver, Phrases, PreferenceResolver};
use prodmon_storage::{AnalysisStore, AssetRecord, AssetStore, StorageError};
use prodmon_telemetry::{record_service_failure, record_store_error};
use prodmon_units::UnitConverter;
use std::sync::Arc;
use tracing::{error, info};

pub const CORRELATION_REQUIRED: &str = "Correlation id is required.";
pub const PAYLOAD_REQUIRED: &str = "Request payload is required.";
pub const ASSET_ID_REQUIRED: &str = "Asset id is required.";
pub const ASSET_NOT_FOUND: &str = "Asset not found.";
pub const ANALYSIS_NOT_FOUND: &str = "Analysis not found.";
pub const LOOKUP_FAILED: &str = "Analysis lookup failed.";

/// 分析服务错误。
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Asset not found.")]
    AssetNotFound,
    #[error("Analysis not found.")]
    AnalysisNotFound,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 分析服务共享依赖。
#[derive(Clone)]
pub struct AnalysisDeps {
    pub(crate) asset_store: Arc<dyn AssetStore>,
    pub(crate) analysis_store: Arc<dyn AnalysisStore>,
    pub(crate) phrases: PhraseResolver,
    pub(crate) preferences: PreferenceResolver,
    pub(crate) units: UnitConverter,
}

impl AnalysisDeps {
    pub fn new(
        asset_store: Arc<dyn AssetStore>,
        analysis_store: Arc<dyn AnalysisStore>,
        phrases: PhraseResolver,
        preferences: PreferenceResolver,
        units: UnitConverter,
    ) -> Self {
        Self {
            asset_store,
            analysis_store,
            phrases,
            preferences,
            units,
        }
    }

    /// 按客户校验资产并解析用户偏好。
    pub(crate) async fn load_asset(
        &self,
        ctx: &CallContext,
        request: &AnalysisInput,
    ) -> Result<(AssetRecord, Preferences), AnalysisError> {
        let asset = self
            .asset_store
            .find_asset(ctx, request.asset_id, request.customer_id)
            .await?
            .ok_or(AnalysisError::AssetNotFound)?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;
        Ok((asset, preferences))
    }

    pub(crate) async fn load_phrases(
        &self,
        ctx: &CallContext,
        preferences: &Preferences,
        keys: &[PhraseKey],
    ) -> Result<Phrases, AnalysisError> {
        let ids = prodmon_locale::phrases::ids(keys);
        Ok(self.phrases.resolve(ctx, &preferences.locale, &ids).await?)
    }
}

/// 入参校验：correlation id、请求体、资产 id。
pub(crate) fn validate<T>(
    input: WithCorrelationId<AnalysisInput>,
    target: &'static str,
) -> Result<(String, AnalysisInput), ServiceResult<T>> {
    let correlation_id = input.correlation_id;
    if correlation_id.trim().is_empty() {
        return Err(reject(&correlation_id, target, CORRELATION_REQUIRED));
    }
    let Some(request) = input.value else {
        return Err(reject(&correlation_id, target, PAYLOAD_REQUIRED));
    };
    if request.asset_id.is_nil() {
        return Err(reject(&correlation_id, target, ASSET_ID_REQUIRED));
    }
    Ok((correlation_id, request))
}

pub(crate) fn reject<T>(correlation_id: &str, target: &str, message: &str) -> ServiceResult<T> {
    record_service_failure();
    info!(
        target: "prodmon.analysis",
        correlation_id = %correlation_id,
        analysis = target,
        reason = message,
        "analysis_rejected"
    );
    ServiceResult::failure(correlation_id, message)
}

pub(crate) fn fail<T>(correlation_id: &str, target: &str, err: AnalysisError) -> ServiceResult<T> {
    match err {
        AnalysisError::Storage(inner) => {
            record_store_error();
            error!(
                target: "prodmon.analysis",
                correlation_id = %correlation_id,
                analysis = target,
                error = %inner,
                "analysis_lookup_failed"
            );
            reject(correlation_id, target, LOOKUP_FAILED)
        }
        other => reject(correlation_id, target, &other.to_string()),
    }
}

/// 分析字段渲染：短语标签 + 单位换算 + 展示文本。
pub(crate) struct FieldWriter<'a> {
    pub texts: &'a Phrases,
    pub units: &'a UnitConverter,
    pub system: UnitSystem,
}

impl FieldWriter<'_> {
    pub fn field(
        &self,
        key: PhraseKey,
        value: Option<f64>,
        unit: Unit,
        decimals: u8,
    ) -> PropertyValueDto {
        let shown = self.units.display(value, unit, self.system, decimals);
        PropertyValueDto {
            id: key.id.to_string(),
            label: self.texts.text(key),
            value: shown.value,
            display_value: shown.text,
            unit: shown.unit.symbol().to_string(),
        }
    }

    /// 仅换算为展示文本（无标签）。
    pub fn text(&self, value: Option<f64>, unit: Unit, decimals: u8) -> String {
        self.units.display(value, unit, self.system, decimals).text
    }
}

/// 两个可选值之差。
pub(crate) fn difference(lhs: Option<f64>, rhs: Option<f64>) -> Option<f64> {
    Some(lhs? - rhs?)
}

//! 电潜泵分析。

use crate::common::{AnalysisDeps, AnalysisError, FieldWriter, difference, fail, validate};
use api_contract::{AnalysisInput, EspAnalysisView, ServiceResult};
use domain::{CallContext, Unit, WithCorrelationId};
use prodmon_locale::{PhraseKey, format, phrases};
use prodmon_storage::EspAnalysisRecord;
use prodmon_telemetry::record_service_request;
use tracing::info;

const TARGET: &str = "esp";

const LABELS: [PhraseKey; 14] = [
    phrases::PUMP_INTAKE_PRESSURE,
    phrases::DISCHARGE_PRESSURE,
    phrases::PUMP_DIFFERENTIAL,
    phrases::HEAD,
    phrases::FLOW_RATE,
    phrases::FREQUENCY,
    phrases::MOTOR_LOAD,
    phrases::MOTOR_CURRENT,
    phrases::PUMP_EFFICIENCY,
    phrases::STAGE_COUNT,
    phrases::REGION_DOWNTHRUST,
    phrases::REGION_UPTHRUST,
    phrases::REGION_WITHIN,
    phrases::UNKNOWN,
];

/// 实际排量相对推荐排量区间的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingRegion {
    Downthrust,
    Upthrust,
    WithinRange,
    Unknown,
}

impl OperatingRegion {
    /// 区间端点含在推荐范围内。
    pub fn classify(flow: Option<f64>, min: Option<f64>, max: Option<f64>) -> Self {
        let (Some(flow), Some(min), Some(max)) = (flow, min, max) else {
            return OperatingRegion::Unknown;
        };
        if flow < min {
            OperatingRegion::Downthrust
        } else if flow > max {
            OperatingRegion::Upthrust
        } else {
            OperatingRegion::WithinRange
        }
    }

    pub fn phrase(&self) -> PhraseKey {
        match self {
            OperatingRegion::Downthrust => phrases::REGION_DOWNTHRUST,
            OperatingRegion::Upthrust => phrases::REGION_UPTHRUST,
            OperatingRegion::WithinRange => phrases::REGION_WITHIN,
            OperatingRegion::Unknown => phrases::UNKNOWN,
        }
    }
}

/// 电潜泵分析服务。
#[derive(Clone)]
pub struct EspAnalysisService {
    deps: AnalysisDeps,
}

impl EspAnalysisService {
    pub fn new(deps: AnalysisDeps) -> Self {
        Self { deps }
    }

    pub async fn get_esp_analysis(
        &self,
        input: WithCorrelationId<AnalysisInput>,
    ) -> ServiceResult<EspAnalysisView> {
        record_service_request();
        let (correlation_id, request) = match validate(input, TARGET) {
            Ok(valid) => valid,
            Err(rejected) => return rejected,
        };
        let ctx = CallContext::new(correlation_id.clone(), request.user_id.clone());
        match self.build_view(&ctx, &request).await {
            Ok(view) => {
                info!(
                    target: "prodmon.analysis",
                    correlation_id = %correlation_id,
                    asset_id = %request.asset_id,
                    test_date = %view.test_date,
                    "esp_analysis_built"
                );
                ServiceResult::success(correlation_id, view)
            }
            Err(err) => fail(&correlation_id, TARGET, err),
        }
    }

    async fn build_view(
        &self,
        ctx: &CallContext,
        request: &AnalysisInput,
    ) -> Result<EspAnalysisView, AnalysisError> {
        let (asset, preferences) = self.deps.load_asset(ctx, request).await?;
        let record = self
            .deps
            .analysis_store
            .get_esp_analysis(ctx, asset.asset_id, request.date_ms)
            .await?
            .ok_or(AnalysisError::AnalysisNotFound)?;
        let texts = self.deps.load_phrases(ctx, &preferences, &LABELS).await?;
        let writer = FieldWriter {
            texts: &texts,
            units: &self.deps.units,
            system: preferences.unit_system,
        };
        Ok(render(&writer, asset.name, record))
    }
}

fn render(writer: &FieldWriter<'_>, well_name: String, record: EspAnalysisRecord) -> EspAnalysisView {
    let differential = difference(
        record.discharge_pressure_psi,
        record.pump_intake_pressure_psi,
    );
    let region = OperatingRegion::classify(
        record.flow_rate_bpd,
        record.recommended_min_rate_bpd,
        record.recommended_max_rate_bpd,
    );

    let values = vec![
        writer.field(
            phrases::PUMP_INTAKE_PRESSURE,
            record.pump_intake_pressure_psi,
            Unit::Psi,
            1,
        ),
        writer.field(
            phrases::DISCHARGE_PRESSURE,
            record.discharge_pressure_psi,
            Unit::Psi,
            1,
        ),
        writer.field(phrases::PUMP_DIFFERENTIAL, differential, Unit::Psi, 1),
        writer.field(phrases::HEAD, record.head_ft, Unit::Feet, 0),
        writer.field(phrases::FLOW_RATE, record.flow_rate_bpd, Unit::BarrelsPerDay, 1),
        writer.field(phrases::FREQUENCY, record.frequency_hz, Unit::Hertz, 1),
        writer.field(phrases::MOTOR_LOAD, record.motor_load_pct, Unit::Percent, 1),
        writer.field(phrases::MOTOR_CURRENT, record.motor_current_amps, Unit::Amps, 1),
        writer.field(
            phrases::PUMP_EFFICIENCY,
            record.pump_efficiency_pct,
            Unit::Percent,
            1,
        ),
        writer.field(
            phrases::STAGE_COUNT,
            record.stage_count.map(f64::from),
            Unit::None,
            0,
        ),
    ];

    EspAnalysisView {
        asset_id: record.asset_id.to_string(),
        well_name,
        test_date: format::timestamp(record.test_date_ms).unwrap_or_default(),
        pump_name: record.pump_name,
        values,
        operating_region: writer.texts.text(region.phrase()),
    }
}

#[cfg(test)]
mod tests {
    use super::OperatingRegion;

    #[test]
    fn region_edges_are_inside() {
        let min = Some(800.0);
        let max = Some(1_600.0);
        assert_eq!(
            OperatingRegion::classify(Some(799.9), min, max),
            OperatingRegion::Downthrust
        );
        assert_eq!(
            OperatingRegion::classify(Some(800.0), min, max),
            OperatingRegion::WithinRange
        );
        assert_eq!(
            OperatingRegion::classify(Some(1_600.0), min, max),
            OperatingRegion::WithinRange
        );
        assert_eq!(
            OperatingRegion::classify(Some(1_700.0), min, max),
            OperatingRegion::Upthrust
        );
        assert_eq!(
            OperatingRegion::classify(Some(1_000.0), None, max),
            OperatingRegion::Unknown
        );
    }
}

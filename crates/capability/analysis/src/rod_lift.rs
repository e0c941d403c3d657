//! 有杆泵功图分析。

use crate::common::{AnalysisDeps, AnalysisError, FieldWriter, difference, fail, validate};
use api_contract::{AnalysisInput, RodLiftAnalysisView, ServiceResult};
use domain::{CallContext, Unit, WithCorrelationId};
use prodmon_locale::{PhraseKey, format, phrases};
use prodmon_storage::RodLiftAnalysisRecord;
use prodmon_telemetry::record_service_request;
use tracing::info;

const TARGET: &str = "rod_lift";

const FULL_FILLAGE_PCT: f64 = 85.0;
const PARTIAL_FILLAGE_PCT: f64 = 50.0;

const LABELS: [PhraseKey; 19] = [
    phrases::PUMP_DEPTH,
    phrases::PUMP_DIAMETER,
    phrases::STROKE_LENGTH,
    phrases::STROKES_PER_MINUTE,
    phrases::GROSS_RATE,
    phrases::PUMP_FILLAGE,
    phrases::PUMP_EFFICIENCY,
    phrases::FLUID_LEVEL,
    phrases::PUMP_INTAKE_PRESSURE,
    phrases::FLUID_ABOVE_PUMP,
    phrases::PEAK_LOAD,
    phrases::MIN_LOAD,
    phrases::GEARBOX_LOADING,
    phrases::ROD_LOADING,
    phrases::STRUCTURAL_LOADING,
    phrases::PUMP_FULL,
    phrases::PUMP_PARTIAL,
    phrases::PUMP_PUMPED_OFF,
    phrases::UNKNOWN,
];

/// 按泵充满度划分的泵况。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCondition {
    Full,
    Partial,
    PumpedOff,
    Unknown,
}

impl PumpCondition {
    pub fn from_fillage(fillage_pct: Option<f64>) -> Self {
        match fillage_pct {
            Some(value) if value >= FULL_FILLAGE_PCT => PumpCondition::Full,
            Some(value) if value >= PARTIAL_FILLAGE_PCT => PumpCondition::Partial,
            Some(_) => PumpCondition::PumpedOff,
            None => PumpCondition::Unknown,
        }
    }

    pub fn phrase(&self) -> PhraseKey {
        match self {
            PumpCondition::Full => phrases::PUMP_FULL,
            PumpCondition::Partial => phrases::PUMP_PARTIAL,
            PumpCondition::PumpedOff => phrases::PUMP_PUMPED_OFF,
            PumpCondition::Unknown => phrases::UNKNOWN,
        }
    }
}

/// 有杆泵分析服务。
#[derive(Clone)]
pub struct RodLiftAnalysisService {
    deps: AnalysisDeps,
}

impl RodLiftAnalysisService {
    pub fn new(deps: AnalysisDeps) -> Self {
        Self { deps }
    }

    /// 读取指定功图日期（缺省为最新）的分析结果。
    pub async fn get_card_date_analysis(
        &self,
        input: WithCorrelationId<AnalysisInput>,
    ) -> ServiceResult<RodLiftAnalysisView> {
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
                    card_date = %view.card_date,
                    "rod_lift_analysis_built"
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
    ) -> Result<RodLiftAnalysisView, AnalysisError> {
        let (asset, preferences) = self.deps.load_asset(ctx, request).await?;
        let record = self
            .deps
            .analysis_store
            .get_rod_lift_analysis(ctx, asset.asset_id, request.date_ms)
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

fn render(
    writer: &FieldWriter<'_>,
    well_name: String,
    record: RodLiftAnalysisRecord,
) -> RodLiftAnalysisView {
    let fluid_above_pump = difference(record.pump_depth_ft, record.fluid_level_ft);
    let condition = PumpCondition::from_fillage(record.pump_fillage_pct);

    let inputs = vec![
        writer.field(phrases::PUMP_DEPTH, record.pump_depth_ft, Unit::Feet, 0),
        writer.field(phrases::PUMP_DIAMETER, record.pump_diameter_in, Unit::Inches, 2),
        writer.field(phrases::STROKE_LENGTH, record.stroke_length_in, Unit::Inches, 1),
        writer.field(
            phrases::STROKES_PER_MINUTE,
            record.spm,
            Unit::StrokesPerMinute,
            1,
        ),
    ];
    let outputs = vec![
        writer.field(phrases::GROSS_RATE, record.gross_rate_bpd, Unit::BarrelsPerDay, 1),
        writer.field(phrases::PUMP_FILLAGE, record.pump_fillage_pct, Unit::Percent, 1),
        writer.field(
            phrases::PUMP_EFFICIENCY,
            record.pump_efficiency_pct,
            Unit::Percent,
            1,
        ),
        writer.field(phrases::FLUID_LEVEL, record.fluid_level_ft, Unit::Feet, 0),
        writer.field(
            phrases::PUMP_INTAKE_PRESSURE,
            record.pump_intake_pressure_psi,
            Unit::Psi,
            1,
        ),
        writer.field(phrases::FLUID_ABOVE_PUMP, fluid_above_pump, Unit::Feet, 0),
    ];
    let loading = vec![
        writer.field(phrases::PEAK_LOAD, record.peak_load_lbs, Unit::Pounds, 0),
        writer.field(phrases::MIN_LOAD, record.min_load_lbs, Unit::Pounds, 0),
        writer.field(
            phrases::GEARBOX_LOADING,
            record.gearbox_loading_pct,
            Unit::Percent,
            1,
        ),
        writer.field(phrases::ROD_LOADING, record.rod_loading_pct, Unit::Percent, 1),
        writer.field(
            phrases::STRUCTURAL_LOADING,
            record.structural_loading_pct,
            Unit::Percent,
            1,
        ),
    ];

    RodLiftAnalysisView {
        asset_id: record.asset_id.to_string(),
        well_name,
        card_date: format::timestamp(record.card_date_ms).unwrap_or_default(),
        inputs,
        outputs,
        loading,
        pump_condition: writer.texts.text(condition.phrase()),
    }
}

#[cfg(test)]
mod tests {
    use super::PumpCondition;

    #[test]
    fn fillage_thresholds() {
        assert_eq!(PumpCondition::from_fillage(Some(85.0)), PumpCondition::Full);
        assert_eq!(PumpCondition::from_fillage(Some(84.9)), PumpCondition::Partial);
        assert_eq!(PumpCondition::from_fillage(Some(50.0)), PumpCondition::Partial);
        assert_eq!(PumpCondition::from_fillage(Some(12.0)), PumpCondition::PumpedOff);
        assert_eq!(PumpCondition::from_fillage(None), PumpCondition::Unknown);
    }
}

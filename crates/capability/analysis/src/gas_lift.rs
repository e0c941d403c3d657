//! 气举分析。

use crate::common::{AnalysisDeps, AnalysisError, FieldWriter, fail, validate};
use api_contract::{AnalysisInput, GasLiftAnalysisView, GasLiftValveDto, PropertyValueDto, ServiceResult};
use domain::{CallContext, Unit, UnitSystem, WithCorrelationId};
use prodmon_locale::{PhraseKey, format, phrases};
use prodmon_storage::{GasLiftAnalysisRecord, GasLiftValveRecord, ValveState};
use prodmon_telemetry::record_service_request;
use prodmon_units::round_to;
use tracing::info;

const TARGET: &str = "gas_lift";

/// 1 scf/bbl = 0.178107607 m³/m³。
const SCF_PER_BBL_TO_M3_PER_M3: f64 = 0.178_107_607;

const LABELS: [PhraseKey; 11] = [
    phrases::INJECTION_RATE,
    phrases::TUBING_PRESSURE,
    phrases::CASING_PRESSURE,
    phrases::INJECTION_DEPTH,
    phrases::FLOWING_BHP,
    phrases::GROSS_RATE,
    phrases::INJECTION_GLR,
    phrases::VALVE_OPEN,
    phrases::VALVE_CLOSED,
    phrases::VALVE_INJECTING,
    phrases::UNKNOWN,
];

/// 气举分析服务。
#[derive(Clone)]
pub struct GasLiftAnalysisService {
    deps: AnalysisDeps,
}

impl GasLiftAnalysisService {
    pub fn new(deps: AnalysisDeps) -> Self {
        Self { deps }
    }

    pub async fn get_gas_lift_analysis(
        &self,
        input: WithCorrelationId<AnalysisInput>,
    ) -> ServiceResult<GasLiftAnalysisView> {
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
                    valves = view.valves.len(),
                    injecting_valve = ?view.injecting_valve,
                    "gas_lift_analysis_built"
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
    ) -> Result<GasLiftAnalysisView, AnalysisError> {
        let (asset, preferences) = self.deps.load_asset(ctx, request).await?;
        let record = self
            .deps
            .analysis_store
            .get_gas_lift_analysis(ctx, asset.asset_id, request.date_ms)
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

/// 注气气液比（scf/bbl）；产液量缺失或不大于零时不计算。
pub fn injection_glr(injection_rate_mcfd: Option<f64>, gross_rate_bpd: Option<f64>) -> Option<f64> {
    let rate = injection_rate_mcfd?;
    let gross = gross_rate_bpd.filter(|gross| *gross > 0.0)?;
    Some(rate * 1_000.0 / gross)
}

/// 最深的注气阀编号（阀按深度升序排列）。
fn injecting_valve(sorted: &[GasLiftValveRecord]) -> Option<u32> {
    sorted
        .iter()
        .rev()
        .find(|valve| valve.state == ValveState::Injecting)
        .map(|valve| valve.number)
}

fn glr_field(writer: &FieldWriter<'_>, glr: Option<f64>) -> PropertyValueDto {
    let (value, unit) = match writer.system {
        UnitSystem::Imperial => (glr, "scf/bbl"),
        UnitSystem::Metric => (glr.map(|v| v * SCF_PER_BBL_TO_M3_PER_M3), "m3/m3"),
    };
    let value = value.map(|v| round_to(v, 0));
    PropertyValueDto {
        id: phrases::INJECTION_GLR.id.to_string(),
        label: writer.texts.text(phrases::INJECTION_GLR),
        value,
        display_value: value
            .map(|v| format!("{} {unit}", format::number(v, 0)))
            .unwrap_or_default(),
        unit: unit.to_string(),
    }
}

fn render(
    writer: &FieldWriter<'_>,
    well_name: String,
    record: GasLiftAnalysisRecord,
) -> GasLiftAnalysisView {
    let mut values = vec![
        writer.field(
            phrases::INJECTION_RATE,
            record.injection_rate_mcfd,
            Unit::McfPerDay,
            1,
        ),
        writer.field(
            phrases::TUBING_PRESSURE,
            record.tubing_pressure_psi,
            Unit::Psi,
            1,
        ),
        writer.field(
            phrases::CASING_PRESSURE,
            record.casing_pressure_psi,
            Unit::Psi,
            1,
        ),
        writer.field(
            phrases::INJECTION_DEPTH,
            record.injection_depth_ft,
            Unit::Feet,
            0,
        ),
        writer.field(phrases::FLOWING_BHP, record.flowing_bhp_psi, Unit::Psi, 1),
        writer.field(phrases::GROSS_RATE, record.gross_rate_bpd, Unit::BarrelsPerDay, 1),
    ];
    let glr = injection_glr(record.injection_rate_mcfd, record.gross_rate_bpd);
    if glr.is_some() {
        values.push(glr_field(writer, glr));
    }

    let mut valves = record.valves;
    valves.sort_by(|a, b| a.depth_ft.total_cmp(&b.depth_ft));
    let injecting = injecting_valve(&valves);
    let injecting_at_deepest_valve =
        injecting.is_some() && valves.last().map(|valve| valve.number) == injecting;

    let valves = valves
        .into_iter()
        .map(|valve| GasLiftValveDto {
            number: valve.number,
            depth: writer.text(Some(valve.depth_ft), Unit::Feet, 0),
            port_size: writer.text(valve.port_size_in, Unit::Inches, 3),
            opening_pressure: writer.text(valve.test_rack_opening_psi, Unit::Psi, 0),
            state: writer.texts.text(phrases::valve_state(valve.state)),
        })
        .collect();

    GasLiftAnalysisView {
        asset_id: record.asset_id.to_string(),
        well_name,
        test_date: format::timestamp(record.test_date_ms).unwrap_or_default(),
        values,
        valves,
        injecting_valve: injecting,
        injecting_at_deepest_valve,
    }
}

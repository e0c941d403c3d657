//! 演示数据
//!
//! 三口井（有杆泵老井、电潜泵新井、气举新井）组成一个分组，
//! 附带状态、分析结果、趋势与近 7 日日统计，便于本地直接调用各接口。

use domain::{IndustryApplication, SourceType, Unit, UnitSystem};
use prodmon_locale::phrases;
use prodmon_storage::{
    AlarmRecord, AlarmState, AssetRecord, AssetStatusRecord, ChannelPointRecord, ColumnAlign,
    ConditionalFormatRecord, DailyHistoryRecord, DailyMetric, EspAnalysisRecord,
    FacilityTagValueRecord, FormatOperator, FormulaRecord, GasLiftAnalysisRecord,
    GasLiftValveRecord, NodeSummaryRecord, ParamStandardAggregate, ParamStandardValueRecord,
    ParameterValueRecord, RodLiftAnalysisRecord, StatusRegisterRecord, StorageError,
    TrendItemRecord, TrendPointRecord, UserPreferenceRecord, ValveState, ViewColumnRecord,
    ViewRecord,
};
use uuid::Uuid;

use crate::InMemoryStores;

pub const DEMO_CUSTOMER_ID: Uuid = Uuid::from_u128(0x5d1e_c0de_0000_4000_8000_0000_0000_0001);
pub const DEMO_GROUP: &str = "Demo Field";
pub const DEMO_VIEW: &str = "production-overview";

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const CASING_ADDRESS: i32 = 2001;
const OIL_RATE_TYPE: i32 = 7;

struct DemoWell {
    asset: AssetRecord,
    run_status: &'static str,
    casing_psi: f64,
    oil_bpd: f64,
}

fn wells() -> Vec<DemoWell> {
    let well = |id: u128, node_id: &str, application: IndustryApplication, is_legacy: bool| {
        AssetRecord {
            asset_id: Uuid::from_u128(id),
            node_id: node_id.to_string(),
            customer_id: DEMO_CUSTOMER_ID,
            name: node_id.to_string(),
            application,
            is_legacy,
            enabled: true,
        }
    };
    vec![
        DemoWell {
            asset: well(0x101, "RL-101", IndustryApplication::RodLift, true),
            run_status: "Running",
            casing_psi: 145.0,
            oil_bpd: 82.0,
        },
        DemoWell {
            asset: well(0x201, "ESP-201", IndustryApplication::Esp, false),
            run_status: "Running",
            casing_psi: 310.0,
            oil_bpd: 640.0,
        },
        DemoWell {
            asset: well(0x301, "GL-301", IndustryApplication::GasLift, false),
            run_status: "Shutdown - Low Injection",
            casing_psi: 880.0,
            oil_bpd: 0.0,
        },
    ]
}

/// 写入全部演示数据。
pub fn seed_demo(stores: &InMemoryStores) -> Result<(), StorageError> {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let wells = wells();
    seed_locale(stores)?;
    for well in &wells {
        seed_well(stores, well, now_ms)?;
    }
    seed_analysis(stores, &wells, now_ms)?;
    seed_group(stores, &wells, now_ms)?;
    Ok(())
}

fn seed_locale(stores: &InMemoryStores) -> Result<(), StorageError> {
    for (key, text) in [
        (phrases::ROD_LIFT, "Bombeo Mecánico"),
        (phrases::ESP, "Bomba Electrosumergible"),
        (phrases::GAS_LIFT, "Levantamiento Artificial por Gas"),
        (phrases::GROSS_RATE, "Producción Bruta"),
        (phrases::PUMP_FILLAGE, "Llenado de Bomba"),
    ] {
        stores.phrases.insert_phrase("es", key.id, text)?;
    }
    stores.preferences.upsert_preferences(UserPreferenceRecord {
        user_id: "demo-metric".to_string(),
        locale: "es".to_string(),
        unit_system: UnitSystem::Metric,
    })?;
    Ok(())
}

fn seed_well(stores: &InMemoryStores, well: &DemoWell, now_ms: i64) -> Result<(), StorageError> {
    let asset = &well.asset;
    stores.assets.insert_asset(asset.clone())?;
    stores.assets.upsert_status(AssetStatusRecord {
        asset_id: asset.asset_id,
        run_status: Some(well.run_status.to_string()),
        comm_status: Some("OK".to_string()),
        last_good_scan_ms: Some(now_ms - 5 * 60_000),
        time_in_state_minutes: Some(1_510),
        today_runtime_pct: Some(96.5),
        yesterday_runtime_pct: Some(100.0),
        operational_score: Some(84.0),
        registers: vec![
            StatusRegisterRecord {
                address: CASING_ADDRESS,
                phrase_id: None,
                description: "Casing Pressure".to_string(),
                value: well.casing_psi,
                unit: Unit::Psi,
                decimals: 1,
            },
            StatusRegisterRecord {
                address: 2002,
                phrase_id: None,
                description: "Motor Temperature".to_string(),
                value: 185.0,
                unit: Unit::Fahrenheit,
                decimals: 0,
            },
        ],
    })?;
    if asset.application == IndustryApplication::GasLift {
        stores.assets.insert_alarm(AlarmRecord {
            node_id: asset.node_id.clone(),
            address: 3005,
            description: "Low Injection Rate".to_string(),
            priority: 2,
            state: AlarmState::Active,
            raised_at_ms: Some(now_ms - 3 * HOUR_MS),
        })?;
    }

    stores.historical.insert_trend_item(TrendItemRecord {
        asset_id: asset.asset_id,
        key: "casing_pressure".to_string(),
        phrase_id: None,
        description: "Casing Pressure".to_string(),
        unit: Unit::Psi,
        decimals: 1,
        address: Some(CASING_ADDRESS),
        channel: Some("casing_pressure".to_string()),
    })?;
    for hour in 0..24 {
        let ts_ms = now_ms - hour * HOUR_MS;
        let value = well.casing_psi + (hour % 5) as f64;
        if asset.is_legacy {
            stores.sql.insert_parameter_point(
                &asset.node_id,
                CASING_ADDRESS,
                TrendPointRecord { ts_ms, value },
            )?;
        } else {
            stores.time_series.insert_point(ChannelPointRecord {
                asset_id: asset.asset_id,
                channel: "casing_pressure".to_string(),
                ts_ms,
                value,
            })?;
        }
    }

    // 近 7 日日统计：有杆泵 / 电潜泵为运行小时，气举为注气量
    let today = now_ms.div_euclid(DAY_MS) * DAY_MS;
    for day in 1..=7 {
        let day_ms = today - day * DAY_MS;
        match asset.application {
            IndustryApplication::RodLift => stores.sql.insert_daily(DailyHistoryRecord {
                node_id: asset.node_id.clone(),
                metric: DailyMetric::RuntimeHours,
                day_ms,
                value: if day == 2 { 18.0 } else { 24.0 },
            })?,
            IndustryApplication::Esp => stores.time_series.insert_point(ChannelPointRecord {
                asset_id: asset.asset_id,
                channel: DailyMetric::RuntimeHours.channel().to_string(),
                ts_ms: day_ms + 23 * HOUR_MS,
                value: 24.0,
            })?,
            IndustryApplication::GasLift => stores.time_series.insert_point(ChannelPointRecord {
                asset_id: asset.asset_id,
                channel: DailyMetric::GasInjectionRate.channel().to_string(),
                ts_ms: day_ms + 12 * HOUR_MS,
                value: if day <= 2 { 10.0 } else { 420.0 },
            })?,
            IndustryApplication::Unknown => {}
        }
    }
    Ok(())
}

fn seed_analysis(
    stores: &InMemoryStores,
    wells: &[DemoWell],
    now_ms: i64,
) -> Result<(), StorageError> {
    for well in wells {
        let asset_id = well.asset.asset_id;
        match well.asset.application {
            IndustryApplication::RodLift => {
                for (days_ago, fillage) in [(1, 92.0), (0, 71.5)] {
                    stores.analysis.insert_rod_lift(RodLiftAnalysisRecord {
                        asset_id,
                        card_date_ms: now_ms - days_ago * DAY_MS,
                        pump_depth_ft: Some(6_200.0),
                        pump_diameter_in: Some(1.75),
                        stroke_length_in: Some(144.0),
                        spm: Some(8.5),
                        gross_rate_bpd: Some(well.oil_bpd * 1.4),
                        pump_fillage_pct: Some(fillage),
                        pump_efficiency_pct: Some(fillage - 6.0),
                        fluid_level_ft: Some(5_650.0),
                        pump_intake_pressure_psi: Some(210.0),
                        peak_load_lbs: Some(18_400.0),
                        min_load_lbs: Some(6_100.0),
                        gearbox_loading_pct: Some(78.0),
                        rod_loading_pct: Some(64.0),
                        structural_loading_pct: Some(58.0),
                    })?;
                }
            }
            IndustryApplication::Esp => stores.analysis.insert_esp(EspAnalysisRecord {
                asset_id,
                test_date_ms: now_ms - DAY_MS,
                pump_name: Some("DN1750".to_string()),
                stage_count: Some(212),
                pump_intake_pressure_psi: Some(420.0),
                discharge_pressure_psi: Some(2_650.0),
                head_ft: Some(5_140.0),
                flow_rate_bpd: Some(1_480.0),
                frequency_hz: Some(58.0),
                motor_load_pct: Some(81.0),
                motor_current_amps: Some(46.5),
                pump_efficiency_pct: Some(63.0),
                recommended_min_rate_bpd: Some(1_200.0),
                recommended_max_rate_bpd: Some(2_050.0),
            })?,
            IndustryApplication::GasLift => stores.analysis.insert_gas_lift(GasLiftAnalysisRecord {
                asset_id,
                test_date_ms: now_ms - DAY_MS,
                injection_rate_mcfd: Some(420.0),
                tubing_pressure_psi: Some(180.0),
                casing_pressure_psi: Some(well.casing_psi),
                injection_depth_ft: Some(7_450.0),
                flowing_bhp_psi: Some(1_120.0),
                gross_rate_bpd: Some(560.0),
                valves: vec![
                    GasLiftValveRecord {
                        number: 3,
                        depth_ft: 7_450.0,
                        port_size_in: Some(0.25),
                        test_rack_opening_psi: Some(905.0),
                        state: ValveState::Injecting,
                    },
                    GasLiftValveRecord {
                        number: 1,
                        depth_ft: 3_200.0,
                        port_size_in: Some(0.1875),
                        test_rack_opening_psi: Some(980.0),
                        state: ValveState::Closed,
                    },
                    GasLiftValveRecord {
                        number: 2,
                        depth_ft: 5_400.0,
                        port_size_in: Some(0.1875),
                        test_rack_opening_psi: Some(945.0),
                        state: ValveState::Closed,
                    },
                ],
            })?,
            IndustryApplication::Unknown => {}
        }
    }
    Ok(())
}

fn column(
    column_id: i32,
    name: &str,
    position: i32,
    source_type: SourceType,
    source_key: &str,
) -> ViewColumnRecord {
    ViewColumnRecord {
        column_id,
        view_id: DEMO_VIEW.to_string(),
        name: name.to_string(),
        position,
        source_type,
        source_key: source_key.to_string(),
        width: 120,
        align: ColumnAlign::Left,
        unit: None,
        decimals: 0,
        aggregate: ParamStandardAggregate::Sum,
        formats: Vec::new(),
    }
}

fn seed_group(
    stores: &InMemoryStores,
    wells: &[DemoWell],
    now_ms: i64,
) -> Result<(), StorageError> {
    let groups = &stores.groups;
    groups.insert_view(ViewRecord {
        view_id: DEMO_VIEW.to_string(),
        name: "Production Overview".to_string(),
        owner_user_id: None,
        is_global: true,
    })?;

    let mut casing = column(6, "Casing Pressure", 5, SourceType::Parameter, "2001");
    casing.unit = Some(Unit::Psi);
    casing.align = ColumnAlign::Right;
    casing.formats = vec![ConditionalFormatRecord {
        operator: FormatOperator::GreaterOrEqual,
        min: Some(800.0),
        max: None,
        text: None,
        back_color: Some("#FFC7CE".to_string()),
        fore_color: Some("#9C0006".to_string()),
    }];
    let mut oil = column(8, "Oil Rate", 7, SourceType::ParamStandard, "7");
    oil.unit = Some(Unit::BarrelsPerDay);
    oil.align = ColumnAlign::Right;
    let mut oil_per_hour = column(9, "Oil Per Hour", 8, SourceType::Formula, "1");
    oil_per_hour.decimals = 1;
    let mut today = column(4, "Today Runtime", 3, SourceType::Common, "TodayRuntime");
    today.decimals = 1;
    for record in [
        column(1, "Well", 0, SourceType::Common, "WellName"),
        column(2, "Run Status", 1, SourceType::Common, "RunStatus"),
        column(3, "Time In State", 2, SourceType::Common, "TimeInState"),
        today,
        column(5, "Score", 4, SourceType::Common, "OperationalScore"),
        casing,
        column(7, "Flare Temp", 6, SourceType::Facility, "FLARE_TEMP"),
        oil,
        oil_per_hour,
        column(10, "Camera", 9, SourceType::Common, "CameraAlarms"),
    ] {
        groups.insert_column(record)?;
    }
    groups.insert_formula(FormulaRecord {
        formula_id: 1,
        expression: "[Oil Rate] / 24".to_string(),
    })?;

    for (index, well) in wells.iter().enumerate() {
        let asset = &well.asset;
        groups.add_group_member(DEMO_GROUP, asset.clone())?;
        groups.upsert_summary(NodeSummaryRecord {
            node_id: asset.node_id.clone(),
            asset_id: asset.asset_id,
            well_name: asset.name.clone(),
            application: asset.application,
            enabled: asset.enabled,
            run_status: Some(well.run_status.to_string()),
            comm_status: Some("OK".to_string()),
            last_good_scan_ms: Some(now_ms - 5 * 60_000),
            time_in_state_minutes: Some(95 * (index as i64 + 1)),
            today_runtime_pct: Some(100.0 - 12.5 * index as f64),
            yesterday_runtime_pct: Some(100.0),
            operational_score: Some(90.0 - 25.0 * index as f64),
            alarm_count: index as u32,
            camera_alarm_count: u32::from(index == 2),
        })?;
        groups.insert_parameter_value(ParameterValueRecord {
            node_id: asset.node_id.clone(),
            address: CASING_ADDRESS,
            value: well.casing_psi,
            unit: Unit::Psi,
        })?;
        groups.insert_facility_tag_value(FacilityTagValueRecord {
            node_id: asset.node_id.clone(),
            tag_name: "FLARE_TEMP".to_string(),
            value: 140.0 + 30.0 * index as f64,
            unit: Unit::Fahrenheit,
            in_alarm: index == 2,
        })?;
        groups.insert_param_standard_value(ParamStandardValueRecord {
            node_id: asset.node_id.clone(),
            param_standard_type: OIL_RATE_TYPE,
            value: well.oil_bpd,
            unit: Unit::BarrelsPerDay,
        })?;
    }
    Ok(())
}

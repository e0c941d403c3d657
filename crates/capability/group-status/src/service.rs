//! 分组状态处理服务。

use crate::columns::{ALARM_RED, ColumnFormatter, ColumnFormatterFactory, CommonField, RawValue};
use crate::conditional;
use crate::downtime::{
    BucketTally, DowntimeConfig, daily_values, metric_for, percent_of, total_downtime, window,
};
use crate::formula::{Formula, FormulaError, normalize_name};
use api_contract::{
    ApplicationDowntimeDto, AssetDowntimeDto, GroupDowntimeInput, GroupDowntimeView,
    GroupStatusColumnDto, GroupStatusInput, GroupStatusRowDto, GroupStatusView,
    GroupStatusViewDto, GroupStatusViewsInput, RunStatusCountDto, RunStatusSummaryDto,
    ServiceResult,
};
use domain::{
    CallContext, IndustryApplication, Preferences, RunStatusClass, SourceType, Unit, UnitSystem,
    WithCorrelationId,
};
use prodmon_locale::{PhraseResolver, Phrases, PreferenceResolver, format, phrases};
use prodmon_storage::{
    AssetRecord, DailyMetric, DataHistorySqlStore, GroupStatusStore, NodeSummaryRecord,
    ParamStandardAggregate, StorageError, TimeSeriesStore, ViewColumnRecord,
};
use prodmon_telemetry::{
    record_grid_rows, record_service_failure, record_service_request, record_store_error,
};
use prodmon_units::{UnitConverter, round_to};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const CORRELATION_REQUIRED: &str = "Correlation id is required.";
pub const PAYLOAD_REQUIRED: &str = "Request payload is required.";
pub const VIEW_ID_REQUIRED: &str = "View id is required.";
pub const GROUP_NAME_REQUIRED: &str = "Group name is required.";
pub const VIEW_NOT_FOUND: &str = "View not found.";
pub const DAY_COUNT_INVALID: &str = "Day count must be greater than zero.";
pub const LOOKUP_FAILED: &str = "Group status lookup failed.";

/// 分组状态服务错误。
#[derive(Debug, thiserror::Error)]
pub enum GroupStatusError {
    #[error("View not found.")]
    ViewNotFound,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 批量取回的各来源数据（按节点索引）。
#[derive(Default)]
struct SourceValues {
    summaries: HashMap<String, NodeSummaryRecord>,
    parameters: HashMap<(String, i32), (f64, Unit)>,
    facility_tags: HashMap<(String, String), (f64, Unit, bool)>,
    param_standards: HashMap<(String, i32), Vec<(f64, Unit)>>,
    formulas: HashMap<i32, Result<Formula, FormulaError>>,
}

/// 分组状态处理服务：视图列表、状态表格、停机统计。
#[derive(Clone)]
pub struct GroupStatusProcessingService {
    group_store: Arc<dyn GroupStatusStore>,
    sql_store: Arc<dyn DataHistorySqlStore>,
    time_series_store: Arc<dyn TimeSeriesStore>,
    phrases: PhraseResolver,
    preferences: PreferenceResolver,
    units: UnitConverter,
    downtime: DowntimeConfig,
}

impl GroupStatusProcessingService {
    pub fn new(
        group_store: Arc<dyn GroupStatusStore>,
        sql_store: Arc<dyn DataHistorySqlStore>,
        time_series_store: Arc<dyn TimeSeriesStore>,
        phrases: PhraseResolver,
        preferences: PreferenceResolver,
        units: UnitConverter,
        downtime: DowntimeConfig,
    ) -> Self {
        Self {
            group_store,
            sql_store,
            time_series_store,
            phrases,
            preferences,
            units,
            downtime,
        }
    }

    /// 用户可见的视图（本人创建 + 全局）。
    pub async fn get_views(
        &self,
        input: WithCorrelationId<GroupStatusViewsInput>,
    ) -> ServiceResult<Vec<GroupStatusViewDto>> {
        record_service_request();
        let correlation_id = input.correlation_id;
        if correlation_id.trim().is_empty() {
            return reject(&correlation_id, CORRELATION_REQUIRED);
        }
        let Some(request) = input.value else {
            return reject(&correlation_id, PAYLOAD_REQUIRED);
        };
        let ctx = CallContext::new(correlation_id.clone(), Some(request.user_id.clone()));
        match self.group_store.list_views(&ctx, request.user_id.trim()).await {
            Ok(views) => {
                let items: Vec<GroupStatusViewDto> = views
                    .into_iter()
                    .map(|view| GroupStatusViewDto {
                        view_id: view.view_id,
                        name: view.name,
                        is_global: view.is_global,
                    })
                    .collect();
                info!(
                    target: "prodmon.group_status",
                    correlation_id = %correlation_id,
                    views = items.len(),
                    "group_views_listed"
                );
                ServiceResult::success(correlation_id, items)
            }
            Err(err) => fail(&correlation_id, GroupStatusError::Storage(err)),
        }
    }

    /// 构建分组状态表格。
    pub async fn get_group_status(
        &self,
        input: WithCorrelationId<GroupStatusInput>,
    ) -> ServiceResult<GroupStatusView> {
        record_service_request();
        let correlation_id = input.correlation_id;
        if correlation_id.trim().is_empty() {
            return reject(&correlation_id, CORRELATION_REQUIRED);
        }
        let Some(request) = input.value else {
            return reject(&correlation_id, PAYLOAD_REQUIRED);
        };
        if request.view_id.trim().is_empty() {
            return reject(&correlation_id, VIEW_ID_REQUIRED);
        }
        if request.group_name.trim().is_empty() {
            return reject(&correlation_id, GROUP_NAME_REQUIRED);
        }
        let ctx = CallContext::new(correlation_id.clone(), request.user_id.clone());
        match self.build_grid(&ctx, &request).await {
            Ok(view) => {
                record_grid_rows(view.rows.len());
                info!(
                    target: "prodmon.group_status",
                    correlation_id = %correlation_id,
                    view_id = %view.view_id,
                    group = %view.group_name,
                    columns = view.columns.len(),
                    rows = view.rows.len(),
                    "group_status_built"
                );
                ServiceResult::success(correlation_id, view)
            }
            Err(err) => fail(&correlation_id, err),
        }
    }

    /// 分组停机统计。
    pub async fn get_group_downtime(
        &self,
        input: WithCorrelationId<GroupDowntimeInput>,
    ) -> ServiceResult<GroupDowntimeView> {
        record_service_request();
        let correlation_id = input.correlation_id;
        if correlation_id.trim().is_empty() {
            return reject(&correlation_id, CORRELATION_REQUIRED);
        }
        let Some(request) = input.value else {
            return reject(&correlation_id, PAYLOAD_REQUIRED);
        };
        if request.group_name.trim().is_empty() {
            return reject(&correlation_id, GROUP_NAME_REQUIRED);
        }
        let day_count = request.day_count.unwrap_or(self.downtime.default_day_count);
        if day_count <= 0 {
            return reject(&correlation_id, DAY_COUNT_INVALID);
        }
        let (start_ms, end_ms) = window(
            request
                .end_ms
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            day_count,
        );

        let ctx = CallContext::new(correlation_id.clone(), request.user_id.clone());
        match self
            .build_downtime(&ctx, &request, day_count, start_ms, end_ms)
            .await
        {
            Ok(view) => {
                info!(
                    target: "prodmon.group_status",
                    correlation_id = %correlation_id,
                    group = %view.group_name,
                    day_count = day_count,
                    assets = view.total_assets,
                    "group_downtime_built"
                );
                ServiceResult::success(correlation_id, view)
            }
            Err(err) => fail(&correlation_id, GroupStatusError::Storage(err)),
        }
    }

    // ------------------------------------------------------------------
    // 表格
    // ------------------------------------------------------------------

    async fn build_grid(
        &self,
        ctx: &CallContext,
        request: &GroupStatusInput,
    ) -> Result<GroupStatusView, GroupStatusError> {
        let view_id = request.view_id.trim();
        let group_name = request.group_name.trim();
        let view = self
            .group_store
            .find_view(ctx, view_id)
            .await?
            .ok_or(GroupStatusError::ViewNotFound)?;
        let mut columns = self.group_store.list_view_columns(ctx, view_id).await?;
        columns.sort_by_key(|column| (column.position, column.column_id));

        let members = self.group_store.list_group_assets(ctx, group_name).await?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;
        let column_dtos = columns
            .iter()
            .map(|column| self.column_dto(column, preferences.unit_system))
            .collect();

        let mut grid = GroupStatusView {
            view_id: view.view_id,
            view_name: view.name,
            group_name: group_name.to_string(),
            columns: column_dtos,
            rows: Vec::new(),
            run_status_summary: run_status_summary(&[], &HashMap::new()),
        };
        if members.is_empty() {
            return Ok(grid);
        }

        let mut unique: BTreeMap<String, AssetRecord> = BTreeMap::new();
        for member in members {
            unique.entry(member.node_id.clone()).or_insert(member);
        }
        let node_ids: Vec<String> = unique.keys().cloned().collect();
        let sources = self.load_sources(ctx, &columns, &node_ids).await?;
        let texts = self.application_phrases(ctx, &preferences).await?;

        let formatters: Vec<Box<dyn ColumnFormatter>> =
            columns.iter().map(ColumnFormatterFactory::for_column).collect();
        grid.rows = unique
            .values()
            .map(|member| {
                self.build_row(member, &columns, &formatters, &sources, &texts, &preferences)
            })
            .collect();
        let members: Vec<&AssetRecord> = unique.values().collect();
        grid.run_status_summary = run_status_summary(&members, &sources.summaries);
        Ok(grid)
    }

    fn column_dto(&self, column: &ViewColumnRecord, system: UnitSystem) -> GroupStatusColumnDto {
        GroupStatusColumnDto {
            column_id: column.column_id.to_string(),
            name: column.name.clone(),
            source_type: column.source_type.as_str().to_string(),
            position: column.position,
            width: column.width,
            align: column.align.as_str().to_string(),
            unit: column
                .unit
                .map(|unit| self.units.target_unit(unit, system).symbol().to_string())
                .unwrap_or_default(),
        }
    }

    async fn application_phrases(
        &self,
        ctx: &CallContext,
        preferences: &Preferences,
    ) -> Result<Phrases, StorageError> {
        let ids = phrases::ids(&[
            phrases::ROD_LIFT,
            phrases::ESP,
            phrases::GAS_LIFT,
            phrases::UNKNOWN,
            phrases::ENABLED,
            phrases::DISABLED,
        ]);
        self.phrases.resolve(ctx, &preferences.locale, &ids).await
    }

    /// 每种来源类型最多一次批量查询；节点汇总总是加载。
    async fn load_sources(
        &self,
        ctx: &CallContext,
        columns: &[ViewColumnRecord],
        node_ids: &[String],
    ) -> Result<SourceValues, StorageError> {
        let mut sources = SourceValues::default();
        for summary in self.group_store.get_node_summaries(ctx, node_ids).await? {
            sources.summaries.insert(summary.node_id.clone(), summary);
        }

        let addresses = numeric_keys(columns, SourceType::Parameter);
        if !addresses.is_empty() {
            for value in self
                .group_store
                .get_parameter_values(ctx, node_ids, &addresses)
                .await?
            {
                sources
                    .parameters
                    .insert((value.node_id, value.address), (value.value, value.unit));
            }
        }

        let mut tags: Vec<String> = columns
            .iter()
            .filter(|column| column.source_type == SourceType::Facility)
            .map(|column| column.source_key.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        if !tags.is_empty() {
            for value in self
                .group_store
                .get_facility_tag_values(ctx, node_ids, &tags)
                .await?
            {
                sources.facility_tags.insert(
                    (value.node_id, value.tag_name),
                    (value.value, value.unit, value.in_alarm),
                );
            }
        }

        let types = numeric_keys(columns, SourceType::ParamStandard);
        if !types.is_empty() {
            for value in self
                .group_store
                .get_param_standard_values(ctx, node_ids, &types)
                .await?
            {
                sources
                    .param_standards
                    .entry((value.node_id, value.param_standard_type))
                    .or_default()
                    .push((value.value, value.unit));
            }
        }

        let formula_ids = numeric_keys(columns, SourceType::Formula);
        if !formula_ids.is_empty() {
            let column_names: Vec<&str> =
                columns.iter().map(|column| column.name.as_str()).collect();
            for record in self.group_store.get_formulas(ctx, &formula_ids).await? {
                let parsed = Formula::parse(&record.expression);
                match &parsed {
                    Ok(formula) => {
                        let missing = formula.missing_references(&column_names);
                        if !missing.is_empty() {
                            warn!(
                                target: "prodmon.group_status",
                                correlation_id = %ctx.correlation_id,
                                formula_id = record.formula_id,
                                missing = ?missing,
                                "formula_reference_unresolved"
                            );
                        }
                    }
                    Err(err) => warn!(
                        target: "prodmon.group_status",
                        correlation_id = %ctx.correlation_id,
                        formula_id = record.formula_id,
                        error = %err,
                        "formula_parse_failed"
                    ),
                }
                sources.formulas.insert(record.formula_id, parsed);
            }
        }
        Ok(sources)
    }

    fn build_row(
        &self,
        member: &AssetRecord,
        columns: &[ViewColumnRecord],
        formatters: &[Box<dyn ColumnFormatter>],
        sources: &SourceValues,
        texts: &Phrases,
        preferences: &Preferences,
    ) -> GroupStatusRowDto {
        let system = preferences.unit_system;
        let mut raws: Vec<(RawValue, bool)> = columns
            .iter()
            .map(|column| self.raw_value(column, member, sources, texts, system))
            .collect();

        // 公式列按位置顺序求值，可引用前面已求出的公式列
        let mut numbers: HashMap<String, f64> = HashMap::new();
        for (column, (raw, _)) in columns.iter().zip(&raws) {
            if column.source_type != SourceType::Formula {
                if let Some(value) = raw.number() {
                    numbers.insert(normalize_name(&column.name), value);
                }
            }
        }
        for (index, column) in columns.iter().enumerate() {
            if column.source_type != SourceType::Formula {
                continue;
            }
            let raw = self.formula_value(column, sources, &numbers, system);
            if let Some(value) = raw.number() {
                numbers.insert(normalize_name(&column.name), value);
            }
            raws[index] = (raw, false);
        }

        let cells = columns
            .iter()
            .zip(formatters)
            .zip(raws)
            .map(|((column, formatter), (raw, in_alarm))| {
                let mut cell = formatter.format(&raw);
                if in_alarm {
                    cell.back_color = Some(ALARM_RED.to_string());
                }
                conditional::apply(&column.formats, &mut cell);
                (column.column_id.to_string(), cell)
            })
            .collect();

        GroupStatusRowDto {
            node_id: member.node_id.clone(),
            asset_id: member.asset_id.to_string(),
            cells,
        }
    }

    /// 非公式列的原始值；第二项表示设施标签处于报警。
    fn raw_value(
        &self,
        column: &ViewColumnRecord,
        member: &AssetRecord,
        sources: &SourceValues,
        texts: &Phrases,
        system: UnitSystem,
    ) -> (RawValue, bool) {
        let node_id = member.node_id.clone();
        match column.source_type {
            SourceType::Common => (
                common_value(column, member, sources.summaries.get(&member.node_id), texts),
                false,
            ),
            SourceType::Parameter => {
                let raw = parse_key(column)
                    .and_then(|address| sources.parameters.get(&(node_id, address)))
                    .map(|(value, unit)| self.display_quantity(*value, *unit, column, system))
                    .unwrap_or(RawValue::Empty);
                (raw, false)
            }
            SourceType::Facility => {
                let key = (node_id, column.source_key.trim().to_string());
                match sources.facility_tags.get(&key) {
                    Some((value, unit, in_alarm)) => (
                        self.display_quantity(*value, *unit, column, system),
                        *in_alarm,
                    ),
                    None => (RawValue::Empty, false),
                }
            }
            SourceType::ParamStandard => {
                let raw = parse_key(column)
                    .and_then(|kind| sources.param_standards.get(&(node_id, kind)))
                    .map(|values| self.aggregate(values, column, system))
                    .unwrap_or(RawValue::Empty);
                (raw, false)
            }
            SourceType::Formula => (RawValue::Empty, false),
        }
    }

    fn formula_value(
        &self,
        column: &ViewColumnRecord,
        sources: &SourceValues,
        numbers: &HashMap<String, f64>,
        system: UnitSystem,
    ) -> RawValue {
        let Some(Ok(formula)) = parse_key(column).and_then(|id| sources.formulas.get(&id)) else {
            return RawValue::Empty;
        };
        let lookup = |name: &str| numbers.get(&normalize_name(name)).copied();
        match formula.evaluate(&lookup) {
            Ok(value) if value.is_finite() => match column.unit {
                Some(unit) => quantity(value, self.units.target_unit(unit, system)),
                None => RawValue::Number(value),
            },
            Ok(_) => RawValue::Empty,
            Err(err) => {
                debug!(
                    target: "prodmon.group_status",
                    column = %column.name,
                    error = %err,
                    "formula_cell_empty"
                );
                RawValue::Empty
            }
        }
    }

    /// 换算到列单位（未配置时取该量纲的首选单位）；量纲不符时保留原值。
    fn display_quantity(
        &self,
        value: f64,
        unit: Unit,
        column: &ViewColumnRecord,
        system: UnitSystem,
    ) -> RawValue {
        let target = self
            .units
            .target_unit(column.unit.unwrap_or(unit), system);
        match self.units.convert(value, unit, target) {
            Ok(converted) => quantity(converted, target),
            Err(_) => quantity(value, unit),
        }
    }

    fn aggregate(
        &self,
        values: &[(f64, Unit)],
        column: &ViewColumnRecord,
        system: UnitSystem,
    ) -> RawValue {
        let mut converted = values
            .iter()
            .map(|(value, unit)| self.display_quantity(*value, *unit, column, system));
        let Some(first) = converted.next() else {
            return RawValue::Empty;
        };
        let unit = match &first {
            RawValue::Quantity { unit, .. } => *unit,
            _ => Unit::None,
        };
        let start = first.number().unwrap_or(0.0);
        let total = converted
            .filter_map(|raw| raw.number())
            .fold(start, |acc, value| match column.aggregate {
                ParamStandardAggregate::Sum => acc + value,
                ParamStandardAggregate::Max => acc.max(value),
            });
        quantity(total, unit)
    }

    // ------------------------------------------------------------------
    // 停机统计
    // ------------------------------------------------------------------

    async fn build_downtime(
        &self,
        ctx: &CallContext,
        request: &GroupDowntimeInput,
        day_count: i64,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<GroupDowntimeView, StorageError> {
        let group_name = request.group_name.trim();
        let members = self.group_store.list_group_assets(ctx, group_name).await?;
        let preferences = self
            .preferences
            .resolve(ctx, request.user_id.as_deref())
            .await;
        let texts = self.application_phrases(ctx, &preferences).await?;

        let mut counted: Vec<(AssetRecord, DailyMetric)> = Vec::new();
        for member in members {
            match metric_for(member.application) {
                Some(metric) => counted.push((member, metric)),
                None => debug!(
                    target: "prodmon.group_status",
                    correlation_id = %ctx.correlation_id,
                    node_id = %member.node_id,
                    "downtime_unknown_application_skipped"
                ),
            }
        }

        let daily = self
            .load_daily_values(ctx, &counted, start_ms, end_ms)
            .await?;

        let mut overall = BucketTally::default();
        let mut by_application: BTreeMap<IndustryApplication, BucketTally> = BTreeMap::new();
        let mut assets = Vec::with_capacity(counted.len());
        for (member, metric) in &counted {
            let days = daily.get(&member.node_id).cloned().unwrap_or_default();
            let hours = total_downtime(&days, *metric, &self.downtime);
            overall.add(hours);
            by_application
                .entry(member.application)
                .or_default()
                .add(hours);
            assets.push(AssetDowntimeDto {
                node_id: member.node_id.clone(),
                asset_id: member.asset_id.to_string(),
                application: texts.text(phrases::application(member.application)),
                source: if member.is_legacy { "sql" } else { "timeseries" }.to_string(),
                downtime_hours: round_to(hours, 1),
                days_with_data: days.len(),
            });
        }
        assets.sort_by(|a, b| {
            b.downtime_hours
                .total_cmp(&a.downtime_hours)
                .then_with(|| a.node_id.cmp(&b.node_id))
        });

        Ok(GroupDowntimeView {
            group_name: group_name.to_string(),
            day_count,
            start: format::rfc3339(start_ms).unwrap_or_default(),
            end: format::rfc3339(end_ms).unwrap_or_default(),
            total_assets: overall.total(),
            buckets: overall.to_dtos(),
            by_application: by_application
                .into_iter()
                .map(|(application, tally)| ApplicationDowntimeDto {
                    application: texts.text(phrases::application(application)),
                    asset_count: tally.total(),
                    buckets: tally.to_dtos(),
                })
                .collect(),
            assets,
        })
    }

    /// 老井走关系库日统计，新井走时序库通道；结果按节点 id 归并为逐日值。
    async fn load_daily_values(
        &self,
        ctx: &CallContext,
        counted: &[(AssetRecord, DailyMetric)],
        start_ms: i64,
        end_ms: i64,
    ) -> Result<HashMap<String, BTreeMap<i64, f64>>, StorageError> {
        let mut daily: HashMap<String, BTreeMap<i64, f64>> = HashMap::new();
        for metric in [DailyMetric::RuntimeHours, DailyMetric::GasInjectionRate] {
            let legacy: Vec<String> = counted
                .iter()
                .filter(|(member, m)| *m == metric && member.is_legacy)
                .map(|(member, _)| member.node_id.clone())
                .collect();
            if !legacy.is_empty() {
                let mut points: HashMap<String, Vec<(i64, f64)>> = HashMap::new();
                for record in self
                    .sql_store
                    .get_daily_history(ctx, &legacy, metric, start_ms, end_ms)
                    .await?
                {
                    points
                        .entry(record.node_id)
                        .or_default()
                        .push((record.day_ms, record.value));
                }
                for (node_id, values) in points {
                    daily.insert(node_id, daily_values(values, metric));
                }
            }

            let modern: HashMap<Uuid, String> = counted
                .iter()
                .filter(|(member, m)| *m == metric && !member.is_legacy)
                .map(|(member, _)| (member.asset_id, member.node_id.clone()))
                .collect();
            if !modern.is_empty() {
                let asset_ids: Vec<Uuid> = modern.keys().copied().collect();
                let mut points: HashMap<String, Vec<(i64, f64)>> = HashMap::new();
                for point in self
                    .time_series_store
                    .get_channel_points(ctx, &asset_ids, metric.channel(), start_ms, end_ms)
                    .await?
                {
                    if let Some(node_id) = modern.get(&point.asset_id) {
                        points
                            .entry(node_id.clone())
                            .or_default()
                            .push((point.ts_ms, point.value));
                    }
                }
                for (node_id, values) in points {
                    daily.insert(node_id, daily_values(values, metric));
                }
            }
        }
        Ok(daily)
    }
}

fn common_value(
    column: &ViewColumnRecord,
    member: &AssetRecord,
    summary: Option<&NodeSummaryRecord>,
    texts: &Phrases,
) -> RawValue {
    let Some(field) = CommonField::parse(&column.source_key) else {
        return RawValue::Empty;
    };
    let text = |value: Option<&String>| {
        value
            .map(|text| RawValue::Text(text.clone()))
            .unwrap_or(RawValue::Empty)
    };
    let number = |value: Option<f64>| value.map(RawValue::Number).unwrap_or(RawValue::Empty);
    match field {
        CommonField::NodeId => RawValue::Text(member.node_id.clone()),
        CommonField::WellName => RawValue::Text(member.name.clone()),
        CommonField::Application => {
            RawValue::Text(texts.text(phrases::application(member.application)))
        }
        CommonField::Enabled => RawValue::Text(texts.text(phrases::enabled(member.enabled))),
        CommonField::RunStatus => text(summary.and_then(|s| s.run_status.as_ref())),
        CommonField::CommStatus => text(summary.and_then(|s| s.comm_status.as_ref())),
        CommonField::LastGoodScan => {
            number(summary.and_then(|s| s.last_good_scan_ms).map(|ms| ms as f64))
        }
        CommonField::TimeInState => number(
            summary
                .and_then(|s| s.time_in_state_minutes)
                .map(|minutes| minutes as f64),
        ),
        CommonField::TodayRuntime => number(summary.and_then(|s| s.today_runtime_pct)),
        CommonField::YesterdayRuntime => number(summary.and_then(|s| s.yesterday_runtime_pct)),
        CommonField::OperationalScore => number(summary.and_then(|s| s.operational_score)),
        CommonField::AlarmCount => number(summary.map(|s| f64::from(s.alarm_count))),
        CommonField::CameraAlarms => number(summary.map(|s| f64::from(s.camera_alarm_count))),
    }
}

/// 运行状态汇总；无汇总记录的节点归为 Unknown。
fn run_status_summary(
    members: &[&AssetRecord],
    summaries: &HashMap<String, NodeSummaryRecord>,
) -> RunStatusSummaryDto {
    let mut counts: BTreeMap<RunStatusClass, usize> = BTreeMap::new();
    for member in members {
        let class = summaries
            .get(&member.node_id)
            .and_then(|summary| summary.run_status.as_deref())
            .map(RunStatusClass::classify)
            .unwrap_or(RunStatusClass::Unknown);
        *counts.entry(class).or_default() += 1;
    }
    let total = members.len();
    RunStatusSummaryDto {
        total,
        items: RunStatusClass::ALL
            .iter()
            .map(|class| {
                let count = counts.get(class).copied().unwrap_or(0);
                RunStatusCountDto {
                    status: class.as_str().to_string(),
                    count,
                    percent: percent_of(count, total),
                }
            })
            .collect(),
    }
}

fn quantity(value: f64, unit: Unit) -> RawValue {
    if unit == Unit::None {
        RawValue::Number(value)
    } else {
        RawValue::Quantity { value, unit }
    }
}

fn parse_key(column: &ViewColumnRecord) -> Option<i32> {
    column.source_key.trim().parse().ok()
}

fn numeric_keys(columns: &[ViewColumnRecord], source_type: SourceType) -> Vec<i32> {
    let mut keys: Vec<i32> = columns
        .iter()
        .filter(|column| column.source_type == source_type)
        .filter_map(parse_key)
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

fn reject<T>(correlation_id: &str, message: &str) -> ServiceResult<T> {
    record_service_failure();
    info!(
        target: "prodmon.group_status",
        correlation_id = %correlation_id,
        reason = message,
        "group_status_rejected"
    );
    ServiceResult::failure(correlation_id, message)
}

fn fail<T>(correlation_id: &str, err: GroupStatusError) -> ServiceResult<T> {
    match err {
        GroupStatusError::Storage(inner) => {
            record_store_error();
            error!(
                target: "prodmon.group_status",
                correlation_id = %correlation_id,
                error = %inner,
                "group_status_lookup_failed"
            );
            reject(correlation_id, LOOKUP_FAILED)
        }
        other => reject(correlation_id, &other.to_string()),
    }
}

//! 停机统计：按天换算停机小时数并归入停机时长区间。

use api_contract::DowntimeBucketDto;
use domain::IndustryApplication;
use prodmon_storage::DailyMetric;
use prodmon_units::round_to;
use std::collections::BTreeMap;

pub const DAY_MS: i64 = 86_400_000;
pub const HOURS_PER_DAY: f64 = 24.0;

/// 停机统计配置。
#[derive(Debug, Clone, Copy)]
pub struct DowntimeConfig {
    pub default_day_count: i64,
    /// 气举井日注气量低于该值（Mcf/d）记为全天停机。
    pub gas_lift_min_injection_mcfd: f64,
}

impl Default for DowntimeConfig {
    fn default() -> Self {
        Self {
            default_day_count: 7,
            gas_lift_min_injection_mcfd: 50.0,
        }
    }
}

/// 停机时长区间（按统计窗口内的总停机小时数）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DowntimeBucket {
    NoDowntime,
    UnderOneDay,
    OneToThreeDays,
    ThreeToSevenDays,
    OverSevenDays,
}

impl DowntimeBucket {
    pub const ALL: [DowntimeBucket; 5] = [
        DowntimeBucket::NoDowntime,
        DowntimeBucket::UnderOneDay,
        DowntimeBucket::OneToThreeDays,
        DowntimeBucket::ThreeToSevenDays,
        DowntimeBucket::OverSevenDays,
    ];

    pub fn classify(hours: f64) -> Self {
        if hours <= 0.0 {
            DowntimeBucket::NoDowntime
        } else if hours < 24.0 {
            DowntimeBucket::UnderOneDay
        } else if hours < 72.0 {
            DowntimeBucket::OneToThreeDays
        } else if hours < 168.0 {
            DowntimeBucket::ThreeToSevenDays
        } else {
            DowntimeBucket::OverSevenDays
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DowntimeBucket::NoDowntime => "No Downtime",
            DowntimeBucket::UnderOneDay => "< 1 Day",
            DowntimeBucket::OneToThreeDays => "1-3 Days",
            DowntimeBucket::ThreeToSevenDays => "3-7 Days",
            DowntimeBucket::OverSevenDays => "> 7 Days",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// 举升方式对应的日统计指标；未知举升方式不参与统计。
pub fn metric_for(application: IndustryApplication) -> Option<DailyMetric> {
    match application {
        IndustryApplication::RodLift | IndustryApplication::Esp => Some(DailyMetric::RuntimeHours),
        IndustryApplication::GasLift => Some(DailyMetric::GasInjectionRate),
        IndustryApplication::Unknown => None,
    }
}

/// 单日停机小时数。
pub fn daily_downtime(metric: DailyMetric, value: f64, config: &DowntimeConfig) -> f64 {
    match metric {
        DailyMetric::RuntimeHours => (HOURS_PER_DAY - value).clamp(0.0, HOURS_PER_DAY),
        DailyMetric::GasInjectionRate => {
            if value < config.gas_lift_min_injection_mcfd {
                HOURS_PER_DAY
            } else {
                0.0
            }
        }
    }
}

/// UTC 零点。
pub fn day_start(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(DAY_MS) * DAY_MS
}

/// 统计窗口 `[end − days, end)`。end 向下取整到 UTC 零点，窗口只含完整的日。
pub fn window(end_ms: i64, day_count: i64) -> (i64, i64) {
    let end = day_start(end_ms);
    (end.saturating_sub(day_count.saturating_mul(DAY_MS)), end)
}

/// 按 UTC 日聚合：运行小时取最大值，注气量取平均值。
pub fn daily_values(
    points: impl IntoIterator<Item = (i64, f64)>,
    metric: DailyMetric,
) -> BTreeMap<i64, f64> {
    let mut grouped: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for (ts_ms, value) in points {
        grouped.entry(day_start(ts_ms)).or_default().push(value);
    }
    grouped
        .into_iter()
        .filter_map(|(day, values)| {
            let aggregated = match metric {
                DailyMetric::RuntimeHours => values.iter().copied().reduce(f64::max)?,
                DailyMetric::GasInjectionRate => {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            };
            Some((day, aggregated))
        })
        .collect()
}

/// 窗口内总停机小时数；无数据的日期不计入。
pub fn total_downtime(
    days: &BTreeMap<i64, f64>,
    metric: DailyMetric,
    config: &DowntimeConfig,
) -> f64 {
    days.values()
        .map(|value| daily_downtime(metric, *value, config))
        .sum()
}

/// 区间计数。
#[derive(Debug, Clone, Default)]
pub struct BucketTally {
    counts: [usize; 5],
    total: usize,
}

impl BucketTally {
    pub fn add(&mut self, hours: f64) {
        self.counts[DowntimeBucket::classify(hours).index()] += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, bucket: DowntimeBucket) -> usize {
        self.counts[bucket.index()]
    }

    /// 百分比保留一位小数。
    pub fn to_dtos(&self) -> Vec<DowntimeBucketDto> {
        DowntimeBucket::ALL
            .iter()
            .map(|bucket| {
                let count = self.count(*bucket);
                DowntimeBucketDto {
                    label: bucket.label().to_string(),
                    count,
                    percent: percent_of(count, self.total),
                }
            })
            .collect()
    }
}

pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 * 100.0 / total as f64, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(DowntimeBucket::classify(0.0), DowntimeBucket::NoDowntime);
        assert_eq!(DowntimeBucket::classify(0.5), DowntimeBucket::UnderOneDay);
        assert_eq!(DowntimeBucket::classify(24.0), DowntimeBucket::OneToThreeDays);
        assert_eq!(DowntimeBucket::classify(71.9), DowntimeBucket::OneToThreeDays);
        assert_eq!(DowntimeBucket::classify(72.0), DowntimeBucket::ThreeToSevenDays);
        assert_eq!(DowntimeBucket::classify(168.0), DowntimeBucket::OverSevenDays);
    }

    #[test]
    fn daily_rules_by_metric() {
        let config = DowntimeConfig::default();
        assert_eq!(daily_downtime(DailyMetric::RuntimeHours, 20.0, &config), 4.0);
        assert_eq!(daily_downtime(DailyMetric::RuntimeHours, 25.0, &config), 0.0);
        assert_eq!(daily_downtime(DailyMetric::RuntimeHours, -1.0, &config), 24.0);
        assert_eq!(daily_downtime(DailyMetric::GasInjectionRate, 49.9, &config), 24.0);
        assert_eq!(daily_downtime(DailyMetric::GasInjectionRate, 50.0, &config), 0.0);
    }

    #[test]
    fn points_group_by_utc_day() {
        let points = vec![
            (DAY_MS + 1_000, 10.0),
            (DAY_MS + 7_200_000, 18.0),
            (2 * DAY_MS, 6.0),
        ];
        let runtime = daily_values(points.clone(), DailyMetric::RuntimeHours);
        assert_eq!(runtime.get(&DAY_MS), Some(&18.0));
        let injection = daily_values(points, DailyMetric::GasInjectionRate);
        assert_eq!(injection.get(&DAY_MS), Some(&14.0));
        assert_eq!(injection.len(), 2);
        assert_eq!(day_start(-1), -DAY_MS);
    }

    #[test]
    fn window_covers_whole_days() {
        let end = 10 * DAY_MS;
        assert_eq!(window(end, 3), (7 * DAY_MS, end));
        assert_eq!(window(end + 18 * 3_600_000, 3), (7 * DAY_MS, end));
        assert_eq!(window(end - 1, 1), (8 * DAY_MS, 9 * DAY_MS));
    }

    #[test]
    fn tally_percentages() {
        let mut tally = BucketTally::default();
        for hours in [0.0, 0.0, 5.0] {
            tally.add(hours);
        }
        let dtos = tally.to_dtos();
        assert_eq!(dtos[0].count, 2);
        assert_eq!(dtos[0].percent, 66.7);
        assert_eq!(dtos[1].percent, 33.3);
        assert_eq!(dtos[4].percent, 0.0);
    }
}

//! Cross-month consolidation.
//!
//! Half-day records are grouped by calendar day and averaged; ordering always
//! uses a zero-padded `YYYY-MM-DD` key because display labels (`dd/mm/yyyy`)
//! do not sort across month or year boundaries.

use chrono::NaiveDate;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::metrics::{DailyMetrics, Headcounts, MonthSummary, SlotTotals, Trends, mean, round2};

static HALF_DAY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r" (Matin|Après-midi)$").unwrap());

/// Display label of the calendar day of a half-day record.
pub fn day_label(record: &DailyMetrics) -> String {
    HALF_DAY_SUFFIX.replace(&record.date, "").into_owned()
}

/// `YYYY-MM-DD` of a record, read from its `dd/mm/yyyy` label.
///
/// Falls back to the header date when the label does not parse.
pub fn sort_key(record: &DailyMetrics) -> String {
    NaiveDate::parse_from_str(&day_label(record), "%d/%m/%Y")
        .unwrap_or(record.day)
        .format("%Y-%m-%d")
        .to_string()
}

fn group_by_day<'a, I>(records: I) -> IndexMap<String, Vec<&'a DailyMetrics>>
where
    I: IntoIterator<Item = &'a DailyMetrics>,
{
    let mut groups: IndexMap<String, Vec<&'a DailyMetrics>> = IndexMap::new();
    for record in records {
        groups.entry(day_label(record)).or_default().push(record);
    }
    groups
}

// ============================================================================
// Day-averaged counters
// ============================================================================

/// One full calendar day, its half-day fields averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedDailyMetric {
    /// "dd/mm/yyyy".
    pub date: String,
    /// "YYYY-MM-DD".
    pub sort_key: String,
    /// Number of half-day records averaged (1 or 2).
    pub half_days: usize,
    pub cumulative_working_days: f64,
    pub headcounts: Headcounts,
    pub slot: SlotTotals,
    pub cumulative: SlotTotals,
    pub global_real_rate: f64,
    pub global_estimated_rate: f64,
}

fn average_day(date: String, records: &[&DailyMetrics]) -> ConsolidatedDailyMetric {
    let n = records.len() as f64;
    let factor = 1.0 / n;

    let sum_headcounts = records.iter().fold(Headcounts::default(), |acc, r| Headcounts {
        total: acc.total + r.headcounts.total,
        front: acc.front + r.headcounts.front,
        back: acc.back + r.headcounts.back,
        cdp: acc.cdp + r.headcounts.cdp,
        design: acc.design + r.headcounts.design,
        cells: acc.cells.zip_with(&r.headcounts.cells, |a, b| a + b),
    });
    let headcounts = Headcounts {
        total: sum_headcounts.total * factor,
        front: sum_headcounts.front * factor,
        back: sum_headcounts.back * factor,
        cdp: sum_headcounts.cdp * factor,
        design: sum_headcounts.design * factor,
        cells: sum_headcounts.cells.map(|v| v * factor),
    };

    let slot = records
        .iter()
        .fold(SlotTotals::default(), |acc, r| acc.plus(&r.slot))
        .scaled(factor);
    let cumulative = records
        .iter()
        .fold(SlotTotals::default(), |acc, r| acc.plus(&r.cumulative))
        .scaled(factor);

    let avg = |f: fn(&DailyMetrics) -> f64| records.iter().map(|r| f(r)).sum::<f64>() / n;

    ConsolidatedDailyMetric {
        sort_key: sort_key(records[0]),
        date,
        half_days: records.len(),
        cumulative_working_days: avg(|r| r.cumulative_working_days),
        headcounts,
        slot,
        cumulative,
        global_real_rate: round2(avg(DailyMetrics::global_real_rate)),
        global_estimated_rate: round2(avg(DailyMetrics::global_estimated_rate)),
    }
}

/// Merge the half-day series of several months into one record per calendar
/// day, in ascending chronological order.
pub fn consolidate_daily_metrics(per_month: &[Vec<DailyMetrics>]) -> Vec<ConsolidatedDailyMetric> {
    let groups = group_by_day(per_month.iter().flatten());

    let mut days: Vec<ConsolidatedDailyMetric> = groups
        .into_iter()
        .map(|(date, records)| average_day(date, &records))
        .collect();
    days.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    days
}

// ============================================================================
// Day-averaged rates
// ============================================================================

/// Mean of each half-day rate over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRatePoint {
    pub date: String,
    pub sort_key: String,
    pub front_rate: f64,
    pub back_rate: f64,
    pub ecommerce_rate: f64,
    pub sur_mesure_rate: f64,
    pub ecommerce_front_rate: f64,
    pub ecommerce_back_rate: f64,
    pub sur_mesure_front_rate: f64,
    pub sur_mesure_back_rate: f64,
}

/// Per-day rate series for charts, in ascending chronological order.
pub fn aggregate_daily_metrics(series: &[DailyMetrics]) -> Vec<DailyRatePoint> {
    let mut points: Vec<DailyRatePoint> = group_by_day(series)
        .into_iter()
        .map(|(date, records)| {
            let avg = |rate: fn(&DailyMetrics) -> f64| {
                let values: Vec<f64> = records.iter().map(|r| rate(r)).collect();
                round2(mean(&values))
            };
            DailyRatePoint {
                sort_key: sort_key(records[0]),
                front_rate: avg(DailyMetrics::front_rate),
                back_rate: avg(DailyMetrics::back_rate),
                ecommerce_rate: avg(DailyMetrics::ecommerce_rate),
                sur_mesure_rate: avg(DailyMetrics::sur_mesure_rate),
                ecommerce_front_rate: avg(DailyMetrics::ecommerce_front_rate),
                ecommerce_back_rate: avg(DailyMetrics::ecommerce_back_rate),
                sur_mesure_front_rate: avg(DailyMetrics::sur_mesure_front_rate),
                sur_mesure_back_rate: avg(DailyMetrics::sur_mesure_back_rate),
                date,
            }
        })
        .collect();
    points.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    points
}

// ============================================================================
// Monthly summaries
// ============================================================================

fn diff(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) => Some(round2(c - p)),
        _ => None,
    }
}

/// Difference between two consecutive summaries.
pub fn trends_between(current: &MonthSummary, previous: &MonthSummary) -> Trends {
    let cur_totals = current.totals;
    let prev_totals = previous.totals;
    Trends {
        real_rate: diff(
            cur_totals.map(|t| t.real_rate),
            prev_totals.map(|t| t.real_rate),
        ),
        estimated_rate: diff(
            cur_totals.map(|t| t.estimated_rate),
            prev_totals.map(|t| t.estimated_rate),
        ),
        front_ecommerce_rate: diff(
            current.specific.front_ecommerce_rate,
            previous.specific.front_ecommerce_rate,
        ),
        back_ecommerce_rate: diff(
            current.specific.back_ecommerce_rate,
            previous.specific.back_ecommerce_rate,
        ),
        front_sur_mesure_rate: diff(
            current.specific.front_sur_mesure_rate,
            previous.specific.front_sur_mesure_rate,
        ),
        back_sur_mesure_rate: diff(
            current.specific.back_sur_mesure_rate,
            previous.specific.back_sur_mesure_rate,
        ),
    }
}

/// Order summaries chronologically and attach trends to all but the first.
pub fn merge_monthly_summaries(mut summaries: Vec<MonthSummary>) -> Vec<MonthSummary> {
    summaries.sort_by_key(|s| s.month);
    for i in 1..summaries.len() {
        let trends = trends_between(&summaries[i], &summaries[i - 1]);
        summaries[i].trends = Some(trends);
    }
    if let Some(first) = summaries.first_mut() {
        first.trends = None;
    }
    summaries
}

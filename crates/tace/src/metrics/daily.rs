//! Half-day series of a month.
//!
//! Every working-day slot pair of the date header yields two records
//! (Matin, Après-midi). Per-slot counters are headcounts: each in-scope
//! person contributes one unit to the status of their cell. Running sums are
//! carried by an explicit fold ([`scan`]) rather than mutable locals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::expertise::{ByExpertise, ExpertiseCell, tracked_per_expertise};
use super::rate::{RateInputs, RatePolicy, StatusCounts};
use crate::calendar::MonthLabel;
use crate::config::AggregatorConfig;
use crate::error::{Result, TaceError};
use crate::input::RawGrid;
use crate::sheet::{Profile, SheetRow, in_scope_rows, scan_half_day_slots};

/// Morning or afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl HalfDay {
    /// Suffix used in display labels.
    pub fn label(self) -> &'static str {
        match self {
            HalfDay::Morning => "Matin",
            HalfDay::Afternoon => "Après-midi",
        }
    }
}

/// In-scope headcounts of a month, constant across its slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headcounts {
    pub total: f64,
    pub front: f64,
    pub back: f64,
    pub cdp: f64,
    pub design: f64,
    pub cells: ByExpertise<f64>,
}

impl Headcounts {
    pub fn from_rows(rows: &[SheetRow<'_>]) -> Self {
        let mut counts = Headcounts {
            total: rows.len() as f64,
            ..Default::default()
        };
        for row in rows {
            match row.person.profile {
                Profile::DevFront => counts.front += 1.0,
                Profile::DevBack => counts.back += 1.0,
                Profile::Cdp => counts.cdp += 1.0,
                Profile::Graphiste => counts.design += 1.0,
                Profile::Other(_) => {}
            }
            if let Some(cell) = ExpertiseCell::of(&row.person) {
                *counts.cells.get_mut(cell) += 1.0;
            }
        }
        counts
    }
}

/// Status counters over all in-scope persons plus the four expertise cells.
///
/// Expertise cells never count interne.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotTotals {
    pub global: StatusCounts,
    pub cells: ByExpertise<StatusCounts>,
}

impl SlotTotals {
    pub fn plus(&self, other: &SlotTotals) -> SlotTotals {
        SlotTotals {
            global: self.global.plus(&other.global),
            cells: self.cells.zip_with(&other.cells, |a, b| a.plus(b)),
        }
    }

    pub fn scaled(&self, factor: f64) -> SlotTotals {
        SlotTotals {
            global: self.global.scaled(factor),
            cells: self.cells.map(|c| c.scaled(factor)),
        }
    }
}

/// Count the statuses found in column `col` of every row.
pub fn slot_totals(rows: &[SheetRow<'_>], col: usize, config: &AggregatorConfig) -> SlotTotals {
    let mut totals = SlotTotals::default();
    for row in rows {
        let Some(cell) = row.cell(col) else {
            continue;
        };
        let Some(kind) = config.status_rules.status_of(&cell.as_text()) else {
            continue;
        };

        totals.global.add(kind, 1.0);
        if let Some(expertise) = ExpertiseCell::of(&row.person) {
            if tracked_per_expertise(kind) {
                totals.cells.get_mut(expertise).add(kind, 1.0);
            }
        }
    }
    totals
}

/// One half-day column to fold into the series.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEvent {
    pub date: NaiveDate,
    pub half: HalfDay,
    pub column: usize,
    pub totals: SlotTotals,
}

/// Running sums carried from one slot to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanState {
    pub cumulative: SlotTotals,
    pub cumulative_working_days: f64,
}

impl ScanState {
    /// The state after one more half-day slot.
    pub fn step(&self, totals: &SlotTotals) -> ScanState {
        ScanState {
            cumulative: self.cumulative.plus(totals),
            cumulative_working_days: self.cumulative_working_days + 0.5,
        }
    }
}

/// One half-day record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    /// "dd/mm/yyyy Matin" or "dd/mm/yyyy Après-midi".
    pub date: String,
    pub day: NaiveDate,
    pub half: HalfDay,
    /// Header column of the slot.
    pub day_index: usize,
    pub is_working_day: bool,
    pub cumulative_working_days: f64,
    pub headcounts: Headcounts,
    /// This slot only.
    pub slot: SlotTotals,
    /// From the first slot of the month up to and including this one.
    pub cumulative: SlotTotals,
}

impl DailyMetrics {
    fn cell_inputs(&self, cells: &[ExpertiseCell]) -> RateInputs {
        let capacity: f64 = cells.iter().map(|c| *self.headcounts.cells.get(*c)).sum();
        let counts = cells
            .iter()
            .fold(StatusCounts::default(), |acc, c| acc.plus(self.slot.cells.get(*c)));
        counts.against(capacity)
    }

    /// Real rate over every in-scope person.
    pub fn global_real_rate(&self) -> f64 {
        self.slot.global.against(self.headcounts.total).rate(RatePolicy::Real)
    }

    /// Estimated rate over every in-scope person.
    pub fn global_estimated_rate(&self) -> f64 {
        self.slot
            .global
            .against(self.headcounts.total)
            .rate(RatePolicy::Estimated)
    }

    /// Front team: capacity is every front developer, counters come from the
    /// two front expertise cells.
    pub fn front_rate(&self) -> f64 {
        let mut inputs = self.cell_inputs(&[ExpertiseCell::FrontEcommerce, ExpertiseCell::FrontSurMesure]);
        inputs.capacity = self.headcounts.front;
        inputs.rate(RatePolicy::Real)
    }

    pub fn back_rate(&self) -> f64 {
        let mut inputs = self.cell_inputs(&[ExpertiseCell::BackEcommerce, ExpertiseCell::BackSurMesure]);
        inputs.capacity = self.headcounts.back;
        inputs.rate(RatePolicy::Real)
    }

    pub fn ecommerce_rate(&self) -> f64 {
        self.cell_inputs(&[ExpertiseCell::FrontEcommerce, ExpertiseCell::BackEcommerce])
            .rate(RatePolicy::Real)
    }

    pub fn sur_mesure_rate(&self) -> f64 {
        self.cell_inputs(&[ExpertiseCell::FrontSurMesure, ExpertiseCell::BackSurMesure])
            .rate(RatePolicy::Real)
    }

    /// Real rate of a single expertise cell.
    pub fn cell_rate(&self, cell: ExpertiseCell) -> f64 {
        self.cell_inputs(&[cell]).rate(RatePolicy::Real)
    }

    pub fn ecommerce_front_rate(&self) -> f64 {
        self.cell_rate(ExpertiseCell::FrontEcommerce)
    }

    pub fn ecommerce_back_rate(&self) -> f64 {
        self.cell_rate(ExpertiseCell::BackEcommerce)
    }

    pub fn sur_mesure_front_rate(&self) -> f64 {
        self.cell_rate(ExpertiseCell::FrontSurMesure)
    }

    pub fn sur_mesure_back_rate(&self) -> f64 {
        self.cell_rate(ExpertiseCell::BackSurMesure)
    }
}

fn slot_label(date: NaiveDate, year: i32, half: HalfDay) -> String {
    format!("{:02}/{:02}/{} {}", date.day(), date.month(), year, half.label())
}

/// Fold slot events into records, threading the running sums.
///
/// Each output pair holds the state *after* its event, so
/// `out[n].0.cumulative == out[n-1].0.cumulative + events[n].totals`.
pub fn scan(
    initial: ScanState,
    events: Vec<SlotEvent>,
    headcounts: &Headcounts,
    year: i32,
) -> Vec<(ScanState, DailyMetrics)> {
    events
        .into_iter()
        .scan(initial, |state, event| {
            *state = state.step(&event.totals);
            let record = DailyMetrics {
                date: slot_label(event.date, year, event.half),
                day: event.date,
                half: event.half,
                day_index: event.column,
                is_working_day: true,
                cumulative_working_days: state.cumulative_working_days,
                headcounts: *headcounts,
                slot: event.totals,
                cumulative: state.cumulative,
            };
            Some((*state, record))
        })
        .collect()
}

/// Half-day records of one month, in ascending date order.
///
/// Slots falling on weekends or public holidays are skipped. Fails with
/// [`TaceError::InsufficientData`] when the grid is too short or no working
/// slot is found.
pub fn compute_daily_metrics(
    grid: &RawGrid,
    month: &MonthLabel,
    config: &AggregatorConfig,
) -> Result<Vec<DailyMetrics>> {
    let layout = &config.layout;
    if grid.row_count() < layout.min_rows() {
        return Err(TaceError::InsufficientData {
            month: month.to_string(),
            reason: format!(
                "{} rows, at least {} required",
                grid.row_count(),
                layout.min_rows()
            ),
        });
    }

    let rows = in_scope_rows(grid, layout, &config.in_scope_category);
    let headcounts = Headcounts::from_rows(&rows);

    let mut slots: Vec<_> = scan_half_day_slots(grid, layout, month.month())
        .into_iter()
        .filter(|slot| slot.is_working_day())
        .collect();
    slots.sort_by_key(|slot| (slot.date, slot.morning_col));

    if slots.is_empty() {
        return Err(TaceError::InsufficientData {
            month: month.to_string(),
            reason: "no working days detected".to_string(),
        });
    }

    let events: Vec<SlotEvent> = slots
        .iter()
        .flat_map(|slot| {
            [
                (HalfDay::Morning, slot.morning_col),
                (HalfDay::Afternoon, slot.afternoon_col),
            ]
            .into_iter()
            .map(|(half, column)| SlotEvent {
                date: slot.date,
                half,
                column,
                totals: slot_totals(&rows, column, config),
            })
        })
        .collect();

    debug!(
        month = %month,
        slots = slots.len(),
        persons = rows.len(),
        "computed daily metrics"
    );

    Ok(scan(ScanState::default(), events, &headcounts, month.year())
        .into_iter()
        .map(|(_, record)| record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;

    // 2025-10-01 (Wed) .. 2025-10-06 (Mon)
    const OCT_1: f64 = 45931.0;

    fn header(serials: &[f64]) -> Vec<Cell> {
        let mut row = vec![Cell::Empty; 5];
        for s in serials {
            row.push(Cell::Number(*s));
            row.push(Cell::Number(*s));
        }
        row
    }

    fn person(name: &str, expertise: &str, profile: &str, cells: &[&str]) -> Vec<Cell> {
        let mut row = vec![
            Cell::Empty,
            Cell::from(name),
            Cell::from(expertise),
            Cell::from(profile),
            Cell::from("CDS"),
        ];
        row.extend(cells.iter().map(|c| Cell::from(*c)));
        row
    }

    fn october_grid(people: Vec<Vec<Cell>>, serials: &[f64]) -> RawGrid {
        let mut rows = vec![Vec::new(), Vec::new(), header(serials)];
        rows.extend(people);
        RawGrid::new(rows)
    }

    fn october() -> MonthLabel {
        MonthLabel::parse("Octobre 2025").unwrap()
    }

    #[test]
    fn test_two_records_per_working_day() {
        let grid = october_grid(
            vec![person("Alice", "E-commerce", "DEV FRONT", &["Absence", "X", "Non-Aff", "Prévision"])],
            &[OCT_1, OCT_1 + 1.0],
        );
        let daily = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap();

        assert_eq!(daily.len(), 4);
        assert_eq!(daily[0].date, "01/10/2025 Matin");
        assert_eq!(daily[1].date, "01/10/2025 Après-midi");
        assert_eq!(daily[2].date, "02/10/2025 Matin");
        assert_eq!(daily[3].day_index, 8);
        assert_eq!(daily[3].cumulative_working_days, 2.0);

        assert_eq!(daily[0].slot.global.absences, 1.0);
        assert_eq!(daily[0].slot.cells.front_ecommerce.absences, 1.0);
        assert_eq!(daily[2].slot.global.non_affected, 1.0);
        assert_eq!(daily[3].cumulative.global.prevision, 1.0);
        assert_eq!(daily[3].cumulative.global.absences, 1.0);
    }

    #[test]
    fn test_weekend_slots_skipped() {
        // Fri 3, Sat 4, Sun 5, Mon 6
        let grid = october_grid(
            vec![person("Alice", "E-commerce", "DEV FRONT", &[])],
            &[OCT_1 + 2.0, OCT_1 + 3.0, OCT_1 + 4.0, OCT_1 + 5.0],
        );
        let daily = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap();

        let labels: Vec<&str> = daily.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "03/10/2025 Matin",
                "03/10/2025 Après-midi",
                "06/10/2025 Matin",
                "06/10/2025 Après-midi"
            ]
        );
    }

    #[test]
    fn test_repeated_header_date_counted_once() {
        let grid = october_grid(
            vec![person("Alice", "E-commerce", "DEV FRONT", &["X", "X", "Absence", "Absence"])],
            &[OCT_1, OCT_1],
        );
        let daily = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap();

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[1].cumulative.global.absences, 0.0);

        let days = crate::consolidate::consolidate_daily_metrics(&[daily]);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].half_days, 2);
    }

    #[test]
    fn test_insufficient_rows() {
        let grid = RawGrid::new(vec![Vec::new(), Vec::new(), header(&[OCT_1])]);
        assert!(matches!(
            compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()),
            Err(TaceError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_no_working_slot() {
        // Saturday only
        let grid = october_grid(
            vec![person("Alice", "E-commerce", "DEV FRONT", &[])],
            &[OCT_1 + 3.0],
        );
        let err = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no working days detected"));
    }

    #[test]
    fn test_interne_counted_globally_only() {
        let grid = october_grid(
            vec![person("Alice", "Sur mesure", "DEV BACK", &["Interne", "Interne"])],
            &[OCT_1],
        );
        let daily = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap();

        assert_eq!(daily[0].slot.global.interne, 1.0);
        assert_eq!(daily[0].slot.cells.back_sur_mesure.interne, 0.0);
        assert_eq!(daily[1].cumulative.global.interne, 2.0);
    }

    #[test]
    fn test_rates() {
        let grid = october_grid(
            vec![
                person("A", "E-commerce", "DEV FRONT", &["Absence"]),
                person("B", "E-commerce", "DEV FRONT", &["Non-Aff"]),
                person("C", "Sur mesure", "DEV FRONT", &["Projet"]),
                person("D", "E-commerce", "DEV BACK", &["Prévision"]),
                person("E", "", "CdP", &["Non-Aff"]),
            ],
            &[OCT_1],
        );
        let daily = compute_daily_metrics(&grid, &october(), &AggregatorConfig::default()).unwrap();
        let morning = &daily[0];

        assert_eq!(morning.headcounts.total, 5.0);
        assert_eq!(morning.headcounts.front, 3.0);
        assert_eq!(morning.headcounts.cells.front_ecommerce, 2.0);

        // (3 - 1 - 1) / (3 - 1)
        assert_eq!(morning.front_rate(), 50.0);
        // (1 - 1) / 1
        assert_eq!(morning.back_rate(), 0.0);
        // capacity 2 + 1, absences 1, non-affected 1, prevision 1
        assert_eq!(morning.ecommerce_rate(), 0.0);
        assert_eq!(morning.sur_mesure_rate(), 100.0);
        assert_eq!(morning.ecommerce_front_rate(), 0.0);
        assert_eq!(morning.sur_mesure_back_rate(), 0.0);
        // (5 - 1 - 2 - 1) / 4
        assert_eq!(morning.global_real_rate(), 25.0);
        assert_eq!(morning.global_estimated_rate(), 50.0);
    }

    #[test]
    fn test_scan_threads_state() {
        let mut totals = SlotTotals::default();
        totals.global.absences = 2.0;
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let events = vec![
            SlotEvent { date, half: HalfDay::Morning, column: 5, totals },
            SlotEvent { date, half: HalfDay::Afternoon, column: 6, totals: SlotTotals::default() },
            SlotEvent { date, half: HalfDay::Morning, column: 7, totals },
        ];

        let out = scan(ScanState::default(), events, &Headcounts::default(), 2025);
        let cumulative: Vec<f64> = out.iter().map(|(s, _)| s.cumulative.global.absences).collect();
        assert_eq!(cumulative, vec![2.0, 2.0, 4.0]);
        assert_eq!(out[2].0.cumulative_working_days, 1.5);
        assert_eq!(out[2].1.cumulative.global.absences, 4.0);
    }
}

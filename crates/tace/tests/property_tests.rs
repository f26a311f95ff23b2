//! Property-based tests for the calendar, rate formula and grid parsing.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p tace --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p tace --test property_tests
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;

use tace::calendar::{
    FRENCH_MONTHS, MonthLabel, easter_sunday, french_holidays, is_weekday, is_working_day,
    sort_month_labels, working_days_in_month,
};
use tace::metrics::{RateInputs, RatePolicy, activity_rate, compute_daily_metrics};
use tace::sheet::{ClassifiedCell, StatusRules};
use tace::{AggregatorConfig, Cell, GridParser, RawGrid};

// =============================================================================
// Test Strategies
// =============================================================================

fn month_label() -> impl Strategy<Value = String> {
    (0usize..12, 1950i32..2150).prop_map(|(m, y)| format!("{} {}", FRENCH_MONTHS[m], y))
}

/// Rate inputs in half-day steps.
fn rate_inputs() -> impl Strategy<Value = RateInputs> {
    (0u32..200, 0u32..200, 0u32..200, 0u32..200).prop_map(|(c, a, n, p)| RateInputs {
        capacity: f64::from(c) * 0.5,
        absences: f64::from(a) * 0.5,
        non_affected: f64::from(n) * 0.5,
        prevision: f64::from(p) * 0.5,
    })
}

/// Serial date of 2025-10-01.
const OCT_1: f64 = 45931.0;

const CELL_VALUES: [&str; 7] = ["", "Boutique", "Absence", "Interne", "Non-Aff", "Prévision", "OUT"];

/// An October 2025 grid: people x (days x 2) cells drawn from `CELL_VALUES`.
fn october_grid() -> impl Strategy<Value = RawGrid> {
    (1usize..8, 1usize..15).prop_flat_map(|(people, days)| {
        prop::collection::vec(
            prop::collection::vec(0usize..CELL_VALUES.len(), days * 2),
            people,
        )
        .prop_map(move |choices| {
            let mut header = vec![Cell::Empty; 5];
            for day in 0..days {
                header.push(Cell::Number(OCT_1 + day as f64));
                header.push(Cell::Number(OCT_1 + day as f64));
            }
            let mut rows = vec![Vec::new(), Vec::new(), header];
            for (i, person) in choices.into_iter().enumerate() {
                let mut row = vec![
                    Cell::Empty,
                    Cell::from(format!("P{i}").as_str()),
                    Cell::from(if i % 2 == 0 { "E-commerce" } else { "Sur mesure" }),
                    Cell::from(if i % 3 == 0 { "DEV BACK" } else { "DEV FRONT" }),
                    Cell::from("CDS"),
                ];
                row.extend(person.into_iter().map(|c| Cell::from(CELL_VALUES[c])));
                rows.push(row);
            }
            RawGrid::new(rows)
        })
    })
}

// =============================================================================
// Calendar
// =============================================================================

proptest! {
    #[test]
    fn easter_is_a_spring_sunday(year in 1900i32..2200) {
        let easter = easter_sunday(year).unwrap();
        prop_assert_eq!(easter.weekday(), Weekday::Sun);
        prop_assert!(easter >= NaiveDate::from_ymd_opt(year, 3, 22).unwrap());
        prop_assert!(easter <= NaiveDate::from_ymd_opt(year, 4, 25).unwrap());
    }

    #[test]
    fn eleven_holidays_never_working_days(year in 1950i32..2150) {
        let holidays = french_holidays(year);
        prop_assert_eq!(holidays.len(), 11);
        prop_assert!(holidays.windows(2).all(|w| w[0].date <= w[1].date));
        for h in holidays {
            prop_assert!(!is_working_day(h.date));
        }
    }

    #[test]
    fn working_days_bounds(label in month_label()) {
        let days = working_days_in_month(&label);
        prop_assert!((20..=23).contains(&days), "{} has {} weekdays", label, days);
    }

    #[test]
    fn working_days_are_weekdays(label in month_label()) {
        let month = MonthLabel::parse(&label).unwrap();
        let weekdays = month.days().into_iter().filter(|d| is_weekday(*d)).count() as u32;
        prop_assert_eq!(working_days_in_month(&label), weekdays);
    }

    #[test]
    fn label_display_roundtrip(label in month_label()) {
        let month = MonthLabel::parse(&label).unwrap();
        prop_assert_eq!(month.to_string(), label);
    }

    #[test]
    fn sorted_labels_are_chronological(labels in prop::collection::vec(month_label(), 0..12)) {
        let sorted = sort_month_labels(&labels);
        prop_assert_eq!(sorted.len(), labels.len());
        let months: Vec<MonthLabel> = sorted.iter().map(|l| MonthLabel::parse(l).unwrap()).collect();
        prop_assert!(months.windows(2).all(|w| w[0] <= w[1]));
    }
}

// =============================================================================
// Rate Formula
// =============================================================================

proptest! {
    #[test]
    fn rate_is_finite(inputs in rate_inputs()) {
        prop_assert!(activity_rate(&inputs, RatePolicy::Real).is_finite());
        prop_assert!(activity_rate(&inputs, RatePolicy::Estimated).is_finite());
    }

    #[test]
    fn real_never_above_estimated(inputs in rate_inputs()) {
        prop_assert!(
            activity_rate(&inputs, RatePolicy::Real) <= activity_rate(&inputs, RatePolicy::Estimated)
        );
    }

    #[test]
    fn estimated_at_most_hundred(inputs in rate_inputs()) {
        prop_assert!(activity_rate(&inputs, RatePolicy::Estimated) <= 100.0);
    }

    #[test]
    fn zero_without_real_capacity(inputs in rate_inputs()) {
        let exhausted = RateInputs { absences: inputs.capacity, ..inputs };
        prop_assert_eq!(activity_rate(&exhausted, RatePolicy::Real), 0.0);
        prop_assert_eq!(activity_rate(&exhausted, RatePolicy::Estimated), 0.0);
    }

    #[test]
    fn rate_has_two_decimals(inputs in rate_inputs()) {
        let rate = activity_rate(&inputs, RatePolicy::Real);
        prop_assert!(((rate * 100.0).round() - rate * 100.0).abs() < 1e-6);
    }
}

// =============================================================================
// Daily Series
// =============================================================================

proptest! {
    #[test]
    fn cumulative_counters_never_decrease(grid in october_grid()) {
        let month = MonthLabel::parse("Octobre 2025").unwrap();
        let daily = compute_daily_metrics(&grid, &month, &AggregatorConfig::default()).unwrap();

        for pair in daily.windows(2) {
            let (prev, cur) = (&pair[0].cumulative.global, &pair[1].cumulative.global);
            prop_assert!(cur.absences >= prev.absences);
            prop_assert!(cur.interne >= prev.interne);
            prop_assert!(cur.non_affected >= prev.non_affected);
            prop_assert!(cur.prevision >= prev.prevision);
            prop_assert!(pair[1].cumulative_working_days > pair[0].cumulative_working_days);
            prop_assert!(pair[0].day <= pair[1].day);
        }
    }

    #[test]
    fn cumulative_is_running_sum_of_slots(grid in october_grid()) {
        let month = MonthLabel::parse("Octobre 2025").unwrap();
        let daily = compute_daily_metrics(&grid, &month, &AggregatorConfig::default()).unwrap();

        prop_assert_eq!(daily[0].cumulative, daily[0].slot);
        for pair in daily.windows(2) {
            // Headcount units sum exactly in f64
            prop_assert_eq!(pair[0].cumulative.plus(&pair[1].slot), pair[1].cumulative);
        }
        for (n, record) in daily.iter().enumerate() {
            prop_assert_eq!(record.cumulative_working_days, 0.5 * (n + 1) as f64);
        }
    }

    #[test]
    fn daily_rates_finite(grid in october_grid()) {
        let month = MonthLabel::parse("Octobre 2025").unwrap();
        let daily = compute_daily_metrics(&grid, &month, &AggregatorConfig::default()).unwrap();

        for record in &daily {
            prop_assert!(record.global_real_rate().is_finite());
            prop_assert!(record.front_rate().is_finite());
            prop_assert!(record.sur_mesure_rate().is_finite());
        }
    }
}

// =============================================================================
// Parsing and Classification
// =============================================================================

proptest! {
    #[test]
    fn parse_text_no_panic(text in "[a-zA-Z0-9,;\t|\" \n]{0,200}") {
        let _ = GridParser::new().parse_text(text.as_bytes());
    }

    #[test]
    fn classify_no_panic(text in "\\PC{0,50}") {
        let _ = StatusRules::default().classify(&text);
    }

    #[test]
    fn project_names_are_trimmed(name in "Projet[a-z]{2,12}", pad in " {0,3}") {
        let text = format!("{pad}{name}{pad}");
        prop_assert_eq!(StatusRules::default().classify(&text), ClassifiedCell::Project(name));
    }

    #[test]
    fn status_keyword_wins(prefix in "[a-z ]{0,10}") {
        let text = format!("{prefix}Non-Aff");
        prop_assert!(matches!(
            StatusRules::default().classify(&text),
            ClassifiedCell::Status(_)
        ));
    }
}

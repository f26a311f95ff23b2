//! Tace: activity-rate metrics for monthly staffing sheets.
//!
//! Each month of a staffing workbook is a grid: one row per person, two
//! columns per day (morning, afternoon) holding either a project name or a
//! status keyword. Tace turns those grids into capacity and activity-rate
//! figures per team, per expertise cell and per half-day, then consolidates
//! several months into one series with trends and alerts.
//!
//! # Pipeline
//!
//! - **calendar**: French month labels, weekdays and public holidays
//! - **sheet**: column layout, person classification and half-day slot scan
//! - **metrics**: team, expertise, daily and project figures for one month
//! - **consolidate**: merge months into one chronological series
//!
//! # Example
//!
//! ```no_run
//! use tace::{Analyzer, GridParser};
//!
//! let (grid, _source) = GridParser::new().parse_file("octobre-2025.tsv").unwrap();
//! let analysis = Analyzer::new().analyze_month("Octobre 2025", &grid).unwrap();
//!
//! for team in &analysis.team_metrics {
//!     println!("{}: {:.2} %", team.team_name, team.real_rate);
//! }
//! ```

pub mod alerts;
pub mod calendar;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod input;
pub mod metrics;
pub mod report;
pub mod sheet;

mod analyzer;

pub use crate::analyzer::{
    Analyzer, AnalyzerConfig, MonthAnalysis, MonthCache, SkippedMonth, WorkbookAnalysis,
};
pub use alerts::{Alert, AlertLevel, AlertThresholds, RateBand};
pub use calendar::{MonthLabel, working_days_in_month};
pub use config::{AggregatorConfig, TeamFilter};
pub use consolidate::{ConsolidatedDailyMetric, consolidate_daily_metrics, merge_monthly_summaries};
pub use error::{Result, TaceError};
pub use input::{Cell, GridParser, GridSource, RawGrid};
pub use metrics::{
    DailyMetrics, ExpertiseMetrics, MonthSummary, ProjectStatistics, TeamMetrics, activity_rate,
};
pub use sheet::{SheetLayout, StatusKind, StatusRules};

//! Activity-rate metrics of a month grid.
//!
//! Every rate in this module goes through [`activity_rate`]: only the
//! (capacity, absences, non-affected, prevision) tuple differs between teams,
//! expertise cells and half-day slots.

mod daily;
mod expertise;
mod projects;
mod rate;
mod summary;
mod team;

pub use daily::{
    DailyMetrics, HalfDay, Headcounts, ScanState, SlotEvent, SlotTotals, compute_daily_metrics,
    scan, slot_totals,
};
pub use expertise::{ByExpertise, ExpertiseCell, ExpertiseMetrics, compute_expertise_metrics};
pub use projects::{ProjectStatistics, ProjectTotals, compute_project_statistics};
pub use rate::{RateInputs, RatePolicy, StatusCounts, activity_rate, mean, round2};
pub use summary::{
    DailyRateSummary, MonthSummary, MonthlyTotals, SpecificTeamTotals, Trends,
    calculate_monthly_summary,
};
pub use team::{HALF_DAY, TeamMetrics, compute_team_metrics};

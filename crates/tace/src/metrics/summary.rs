//! Month-level summary shapes.

use serde::{Deserialize, Serialize};

use super::daily::DailyMetrics;
use super::expertise::{ExpertiseCell, ExpertiseMetrics};
use super::rate::{mean, round2};
use super::team::TeamMetrics;
use crate::calendar::MonthLabel;

/// Mean half-day rates over a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRateSummary {
    pub front_rate: f64,
    pub back_rate: f64,
    pub ecommerce_rate: f64,
    pub sur_mesure_rate: f64,
}

/// Average the front, back, e-commerce and sur-mesure rates of every half-day.
///
/// All zero for an empty series.
pub fn calculate_monthly_summary(daily: &[DailyMetrics]) -> DailyRateSummary {
    if daily.is_empty() {
        return DailyRateSummary::default();
    }

    let avg = |rate: fn(&DailyMetrics) -> f64| {
        let values: Vec<f64> = daily.iter().map(rate).collect();
        round2(mean(&values))
    };

    DailyRateSummary {
        front_rate: avg(DailyMetrics::front_rate),
        back_rate: avg(DailyMetrics::back_rate),
        ecommerce_rate: avg(DailyMetrics::ecommerce_rate),
        sur_mesure_rate: avg(DailyMetrics::sur_mesure_rate),
    }
}

/// Global rates of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub real_rate: f64,
    pub estimated_rate: f64,
}

impl MonthlyTotals {
    /// Taken from the total row; `None` when it is missing or has no members.
    pub fn from_team_metrics(teams: &[TeamMetrics], total_team_name: &str) -> Option<Self> {
        teams
            .iter()
            .find(|t| t.team_name == total_team_name && !t.is_empty())
            .map(|t| MonthlyTotals {
                real_rate: t.real_rate,
                estimated_rate: t.estimated_rate,
            })
    }
}

/// Real rates of the four expertise cells. A cell without members has no rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificTeamTotals {
    pub front_ecommerce_rate: Option<f64>,
    pub back_ecommerce_rate: Option<f64>,
    pub front_sur_mesure_rate: Option<f64>,
    pub back_sur_mesure_rate: Option<f64>,
}

impl SpecificTeamTotals {
    pub fn from_expertise_metrics(metrics: &[ExpertiseMetrics]) -> Self {
        let rate_of = |cell: ExpertiseCell| {
            metrics
                .iter()
                .find(|m| m.cell == cell && !m.is_empty())
                .map(|m| m.real_rate)
        };

        SpecificTeamTotals {
            front_ecommerce_rate: rate_of(ExpertiseCell::FrontEcommerce),
            back_ecommerce_rate: rate_of(ExpertiseCell::BackEcommerce),
            front_sur_mesure_rate: rate_of(ExpertiseCell::FrontSurMesure),
            back_sur_mesure_rate: rate_of(ExpertiseCell::BackSurMesure),
        }
    }

    /// (label, rate) pairs in report order.
    pub fn labelled(&self) -> [(&'static str, Option<f64>); 4] {
        [
            (ExpertiseCell::FrontEcommerce.label(), self.front_ecommerce_rate),
            (ExpertiseCell::BackEcommerce.label(), self.back_ecommerce_rate),
            (ExpertiseCell::FrontSurMesure.label(), self.front_sur_mesure_rate),
            (ExpertiseCell::BackSurMesure.label(), self.back_sur_mesure_rate),
        ]
    }
}

/// Change since the previous month, in percentage points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub real_rate: Option<f64>,
    pub estimated_rate: Option<f64>,
    pub front_ecommerce_rate: Option<f64>,
    pub back_ecommerce_rate: Option<f64>,
    pub front_sur_mesure_rate: Option<f64>,
    pub back_sur_mesure_rate: Option<f64>,
}

/// Everything reported for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: MonthLabel,
    pub totals: Option<MonthlyTotals>,
    pub specific: SpecificTeamTotals,
    pub daily: DailyRateSummary,
    /// Set when merged with an earlier month.
    pub trends: Option<Trends>,
}

impl MonthSummary {
    pub fn new(
        month: MonthLabel,
        teams: &[TeamMetrics],
        expertise: &[ExpertiseMetrics],
        daily: &[DailyMetrics],
        total_team_name: &str,
    ) -> Self {
        Self {
            month,
            totals: MonthlyTotals::from_team_metrics(teams, total_team_name),
            specific: SpecificTeamTotals::from_expertise_metrics(expertise),
            daily: calculate_monthly_summary(daily),
            trends: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, count: usize, real: f64) -> TeamMetrics {
        TeamMetrics {
            team_name: name.to_string(),
            collaborator_count: count,
            collaborator_names: Vec::new(),
            theoretical_capacity: 0.0,
            absence_days: 0.0,
            interne_days: 0.0,
            non_affected_days: 0.0,
            prevision_days: 0.0,
            real_rate: real,
            estimated_rate: real + 5.0,
        }
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(calculate_monthly_summary(&[]), DailyRateSummary::default());
    }

    #[test]
    fn test_monthly_totals_from_total_row() {
        let teams = vec![team("Total CDS", 3, 80.0), team("Equipe Front", 1, 50.0)];
        let totals = MonthlyTotals::from_team_metrics(&teams, "Total CDS").unwrap();
        assert_eq!(totals.real_rate, 80.0);
        assert_eq!(totals.estimated_rate, 85.0);
    }

    #[test]
    fn test_monthly_totals_absent() {
        let teams = vec![team("Total CDS", 0, 0.0)];
        assert!(MonthlyTotals::from_team_metrics(&teams, "Total CDS").is_none());
        assert!(MonthlyTotals::from_team_metrics(&[], "Total CDS").is_none());
    }
}

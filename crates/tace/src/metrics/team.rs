//! Monthly metrics per team.

use serde::{Deserialize, Serialize};

use super::rate::{RateInputs, RatePolicy, StatusCounts};
use crate::config::AggregatorConfig;
use crate::sheet::{SheetRow, StatusRules};

/// Each status cell stands for half a day.
pub const HALF_DAY: f64 = 0.5;

/// Capacity and activity of one team over a month.
///
/// Counters are in days; rates are percentages rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetrics {
    pub team_name: String,
    /// Members of the team, named or not.
    pub collaborator_count: usize,
    /// Non-empty member names, in sheet order.
    pub collaborator_names: Vec<String>,
    /// `working_days × collaborator_count`.
    pub theoretical_capacity: f64,
    pub absence_days: f64,
    pub interne_days: f64,
    pub non_affected_days: f64,
    pub prevision_days: f64,
    pub real_rate: f64,
    pub estimated_rate: f64,
}

impl TeamMetrics {
    /// Theoretical capacity minus absences.
    pub fn real_capacity(&self) -> f64 {
        self.theoretical_capacity - self.absence_days
    }

    /// True when the team has no members this month.
    pub fn is_empty(&self) -> bool {
        self.collaborator_count == 0
    }
}

/// Sum the status cells of `members`, half a day per cell.
pub(crate) fn tally_half_days(members: &[&SheetRow<'_>], rules: &StatusRules) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for row in members {
        for cell in row.status_cells() {
            if let Some(kind) = rules.status_of(&cell.as_text()) {
                counts.add(kind, HALF_DAY);
            }
        }
    }
    counts
}

fn member_names(members: &[&SheetRow<'_>]) -> Vec<String> {
    members
        .iter()
        .map(|row| row.person.name.clone())
        .filter(|name| !name.is_empty())
        .collect()
}

pub(crate) fn group_metrics(
    name: &str,
    members: &[&SheetRow<'_>],
    working_days: u32,
    rules: &StatusRules,
) -> TeamMetrics {
    let counts = tally_half_days(members, rules);
    let theoretical_capacity = f64::from(working_days) * members.len() as f64;
    let inputs = counts.against(theoretical_capacity);

    TeamMetrics {
        team_name: name.to_string(),
        collaborator_count: members.len(),
        collaborator_names: member_names(members),
        theoretical_capacity,
        absence_days: counts.absences,
        interne_days: counts.interne,
        non_affected_days: counts.non_affected,
        prevision_days: counts.prevision,
        real_rate: inputs.rate(RatePolicy::Real),
        estimated_rate: inputs.rate(RatePolicy::Estimated),
    }
}

/// The total row first, then one row per configured team.
///
/// `rows` must already be restricted to in-scope persons. Teams with no
/// members are still emitted, with zero capacity and zero rates.
pub fn compute_team_metrics(
    rows: &[SheetRow<'_>],
    working_days: u32,
    config: &AggregatorConfig,
) -> Vec<TeamMetrics> {
    let everyone: Vec<&SheetRow<'_>> = rows.iter().collect();
    let mut results = Vec::with_capacity(config.teams.len() + 1);
    results.push(group_metrics(
        &config.total_team_name,
        &everyone,
        working_days,
        &config.status_rules,
    ));

    for team in &config.teams {
        let members: Vec<&SheetRow<'_>> = rows
            .iter()
            .filter(|row| row.person.profile.label() == team.profile)
            .collect();
        results.push(group_metrics(
            &team.name,
            &members,
            working_days,
            &config.status_rules,
        ));
    }

    results
}

/// Rate inputs of a team row.
impl From<&TeamMetrics> for RateInputs {
    fn from(m: &TeamMetrics) -> Self {
        RateInputs {
            capacity: m.theoretical_capacity,
            absences: m.absence_days,
            non_affected: m.non_affected_days,
            prevision: m.prevision_days,
        }
    }
}

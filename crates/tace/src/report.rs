//! Table rows for display.
//!
//! Rates are shown with one decimal and a " %" suffix; day counters with at
//! most one decimal. Groups with no collaborators are left out.

use serde::{Deserialize, Serialize};

use crate::calendar::MonthLabel;
use crate::metrics::{ExpertiseMetrics, TeamMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Title,
    Rate,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    /// Formatted value; empty for titles.
    pub value: String,
    pub kind: RowKind,
    /// Unformatted value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
}

impl TableRow {
    pub fn title(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            kind: RowKind::Title,
            number: None,
        }
    }

    pub fn rate(label: impl Into<String>, rate: f64) -> Self {
        Self {
            label: label.into(),
            value: format_rate(rate),
            kind: RowKind::Rate,
            number: Some(rate),
        }
    }

    pub fn value(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: format_days(value),
            kind: RowKind::Value,
            number: Some(value),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// "66.7 %".
pub fn format_rate(rate: f64) -> String {
    format!("{} %", format_days(rate))
}

/// One decimal at most: "22", "1.5".
pub fn format_days(value: f64) -> String {
    let rounded = round1(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Monthly team table: the total group first, then one block per team.
pub fn team_rows(
    month: &MonthLabel,
    working_days: u32,
    teams: &[TeamMetrics],
    total_team_name: &str,
) -> Vec<TableRow> {
    let mut rows = vec![TableRow::title(format!(
        "{month} ({working_days} jours ouvrés)"
    ))];

    for team in teams.iter().filter(|t| !t.is_empty()) {
        if team.team_name == total_team_name {
            rows.extend([
                TableRow::title(team.team_name.to_uppercase()),
                TableRow::rate("Taux d'activité réel (hors prévision)", team.real_rate),
                TableRow::rate("Taux d'activité estimé (prévision incluse)", team.estimated_rate),
                TableRow::value("Collaborateurs", team.collaborator_count as f64),
                TableRow::value("Capacité de production théorique", team.theoretical_capacity),
                TableRow::value("Jours absence : congés/OUT", team.absence_days),
                TableRow::value("Jours interne", team.interne_days),
                TableRow::value("Jours non affecté", team.non_affected_days),
                TableRow::value("Jours prévision", team.prevision_days),
                TableRow::value("Capacité de production réelle", team.real_capacity()),
            ]);
        } else {
            rows.extend([
                TableRow::title(team.team_name.to_uppercase()),
                TableRow::rate("Taux d'activité réel", team.real_rate),
                TableRow::rate("Taux d'activité estimé", team.estimated_rate),
                TableRow::value("Collaborateurs", team.collaborator_count as f64),
                TableRow::value("Jours à produire", team.theoretical_capacity),
                TableRow::value("Jours absence : congés/OUT", team.absence_days),
                TableRow::value("Jours non affecté", team.non_affected_days),
                TableRow::value("Jours prévision", team.prevision_days),
            ]);
        }
    }

    rows
}

/// One block per expertise cell with members.
pub fn expertise_rows(expertise: &[ExpertiseMetrics]) -> Vec<TableRow> {
    expertise
        .iter()
        .filter(|m| !m.is_empty())
        .flat_map(|m| {
            [
                TableRow::title(m.expertise_name.to_uppercase()),
                TableRow::rate("Taux d'activité réel", m.real_rate),
                TableRow::rate("Taux d'activité estimé", m.estimated_rate),
                TableRow::value("Collaborateurs", m.collaborator_count as f64),
                TableRow::value("Jours à produire", m.theoretical_capacity),
                TableRow::value("Jours absence : congés/OUT", m.absence_days),
                TableRow::value("Jours non affecté", m.non_affected_days),
                TableRow::value("Jours prévision", m.prevision_days),
            ]
        })
        .collect()
}

//! Days spent per project, split by profile.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::team::HALF_DAY;
use crate::config::AggregatorConfig;
use crate::input::RawGrid;
use crate::sheet::{ClassifiedCell, Profile, in_scope_rows};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatistics {
    pub project_name: String,
    pub total_days: f64,
    pub front_days: f64,
    pub back_days: f64,
    pub cdp_days: f64,
    pub design_days: f64,
}

impl ProjectStatistics {
    fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            total_days: 0.0,
            front_days: 0.0,
            back_days: 0.0,
            cdp_days: 0.0,
            design_days: 0.0,
        }
    }

    fn record(&mut self, profile: &Profile, days: f64) {
        self.total_days += days;
        match profile {
            Profile::DevFront => self.front_days += days,
            Profile::DevBack => self.back_days += days,
            Profile::Cdp => self.cdp_days += days,
            Profile::Graphiste => self.design_days += days,
            Profile::Other(_) => {}
        }
    }
}

/// Sums over every project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotals {
    pub total_days: f64,
    pub front_days: f64,
    pub back_days: f64,
    pub cdp_days: f64,
    pub design_days: f64,
}

impl ProjectTotals {
    pub fn from_projects(projects: &[ProjectStatistics]) -> Self {
        projects.iter().fold(ProjectTotals::default(), |acc, p| ProjectTotals {
            total_days: acc.total_days + p.total_days,
            front_days: acc.front_days + p.front_days,
            back_days: acc.back_days + p.back_days,
            cdp_days: acc.cdp_days + p.cdp_days,
            design_days: acc.design_days + p.design_days,
        })
    }
}

/// Project half-days of every in-scope person, by total days descending.
///
/// Projects with equal totals keep their first-seen order.
pub fn compute_project_statistics(grid: &RawGrid, config: &AggregatorConfig) -> Vec<ProjectStatistics> {
    let mut projects: IndexMap<String, ProjectStatistics> = IndexMap::new();

    for row in in_scope_rows(grid, &config.layout, &config.in_scope_category) {
        for cell in row.status_cells() {
            if let ClassifiedCell::Project(name) = config.status_rules.classify(&cell.as_text()) {
                projects
                    .entry(name)
                    .or_insert_with_key(|key| ProjectStatistics::new(key))
                    .record(&row.person.profile, HALF_DAY);
            }
        }
    }

    let mut projects: Vec<ProjectStatistics> = projects.into_values().collect();
    projects.sort_by(|a, b| b.total_days.total_cmp(&a.total_days));
    projects
}

//! Front/Back × E-commerce/Sur mesure cross-products.

use serde::{Deserialize, Serialize};

use super::rate::{RatePolicy, StatusCounts};
use super::team::tally_half_days;
use crate::config::AggregatorConfig;
use crate::sheet::{Expertise, PersonRecord, Profile, SheetRow, StatusKind};

/// One of the four fixed (profile, expertise) cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpertiseCell {
    FrontEcommerce,
    FrontSurMesure,
    BackEcommerce,
    BackSurMesure,
}

impl ExpertiseCell {
    /// Report order.
    pub const ALL: [ExpertiseCell; 4] = [
        ExpertiseCell::FrontEcommerce,
        ExpertiseCell::FrontSurMesure,
        ExpertiseCell::BackEcommerce,
        ExpertiseCell::BackSurMesure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpertiseCell::FrontEcommerce => "Front E-commerce",
            ExpertiseCell::FrontSurMesure => "Front Sur mesure",
            ExpertiseCell::BackEcommerce => "Back E-commerce",
            ExpertiseCell::BackSurMesure => "Back Sur mesure",
        }
    }

    pub fn profile(self) -> Profile {
        match self {
            ExpertiseCell::FrontEcommerce | ExpertiseCell::FrontSurMesure => Profile::DevFront,
            ExpertiseCell::BackEcommerce | ExpertiseCell::BackSurMesure => Profile::DevBack,
        }
    }

    pub fn expertise(self) -> Expertise {
        match self {
            ExpertiseCell::FrontEcommerce | ExpertiseCell::BackEcommerce => Expertise::Ecommerce,
            ExpertiseCell::FrontSurMesure | ExpertiseCell::BackSurMesure => Expertise::SurMesure,
        }
    }

    /// The cell a person belongs to, if any.
    pub fn of(person: &PersonRecord) -> Option<ExpertiseCell> {
        match (&person.profile, &person.expertise) {
            (Profile::DevFront, Expertise::Ecommerce) => Some(ExpertiseCell::FrontEcommerce),
            (Profile::DevFront, Expertise::SurMesure) => Some(ExpertiseCell::FrontSurMesure),
            (Profile::DevBack, Expertise::Ecommerce) => Some(ExpertiseCell::BackEcommerce),
            (Profile::DevBack, Expertise::SurMesure) => Some(ExpertiseCell::BackSurMesure),
            _ => None,
        }
    }
}

/// One value per expertise cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByExpertise<T> {
    pub front_ecommerce: T,
    pub front_sur_mesure: T,
    pub back_ecommerce: T,
    pub back_sur_mesure: T,
}

impl<T> ByExpertise<T> {
    pub fn get(&self, cell: ExpertiseCell) -> &T {
        match cell {
            ExpertiseCell::FrontEcommerce => &self.front_ecommerce,
            ExpertiseCell::FrontSurMesure => &self.front_sur_mesure,
            ExpertiseCell::BackEcommerce => &self.back_ecommerce,
            ExpertiseCell::BackSurMesure => &self.back_sur_mesure,
        }
    }

    pub fn get_mut(&mut self, cell: ExpertiseCell) -> &mut T {
        match cell {
            ExpertiseCell::FrontEcommerce => &mut self.front_ecommerce,
            ExpertiseCell::FrontSurMesure => &mut self.front_sur_mesure,
            ExpertiseCell::BackEcommerce => &mut self.back_ecommerce,
            ExpertiseCell::BackSurMesure => &mut self.back_sur_mesure,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByExpertise<U> {
        ByExpertise {
            front_ecommerce: f(&self.front_ecommerce),
            front_sur_mesure: f(&self.front_sur_mesure),
            back_ecommerce: f(&self.back_ecommerce),
            back_sur_mesure: f(&self.back_sur_mesure),
        }
    }

    /// Combine two values cell by cell.
    pub fn zip_with<U, V>(&self, other: &ByExpertise<U>, mut f: impl FnMut(&T, &U) -> V) -> ByExpertise<V> {
        ByExpertise {
            front_ecommerce: f(&self.front_ecommerce, &other.front_ecommerce),
            front_sur_mesure: f(&self.front_sur_mesure, &other.front_sur_mesure),
            back_ecommerce: f(&self.back_ecommerce, &other.back_ecommerce),
            back_sur_mesure: f(&self.back_sur_mesure, &other.back_sur_mesure),
        }
    }
}

/// Capacity and activity of one expertise cell over a month.
///
/// Same shape as a team row, without the interne counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertiseMetrics {
    pub expertise_name: String,
    pub cell: ExpertiseCell,
    pub collaborator_count: usize,
    pub collaborator_names: Vec<String>,
    pub theoretical_capacity: f64,
    pub absence_days: f64,
    pub non_affected_days: f64,
    pub prevision_days: f64,
    pub real_rate: f64,
    pub estimated_rate: f64,
}

impl ExpertiseMetrics {
    pub fn is_empty(&self) -> bool {
        self.collaborator_count == 0
    }
}

/// The four expertise cells, always in [`ExpertiseCell::ALL`] order.
///
/// Interne half-days are not tracked per expertise.
pub fn compute_expertise_metrics(
    rows: &[SheetRow<'_>],
    working_days: u32,
    config: &AggregatorConfig,
) -> Vec<ExpertiseMetrics> {
    ExpertiseCell::ALL
        .iter()
        .map(|&cell| {
            let members: Vec<&SheetRow<'_>> = rows
                .iter()
                .filter(|row| ExpertiseCell::of(&row.person) == Some(cell))
                .collect();

            let mut counts = tally_half_days(&members, &config.status_rules);
            counts.interne = 0.0;

            expertise_row(cell, &members, working_days, counts)
        })
        .collect()
}

fn expertise_row(
    cell: ExpertiseCell,
    members: &[&SheetRow<'_>],
    working_days: u32,
    counts: StatusCounts,
) -> ExpertiseMetrics {
    let theoretical_capacity = f64::from(working_days) * members.len() as f64;
    let inputs = counts.against(theoretical_capacity);

    ExpertiseMetrics {
        expertise_name: cell.label().to_string(),
        cell,
        collaborator_count: members.len(),
        collaborator_names: members
            .iter()
            .map(|row| row.person.name.clone())
            .filter(|name| !name.is_empty())
            .collect(),
        theoretical_capacity,
        absence_days: counts.absences,
        non_affected_days: counts.non_affected,
        prevision_days: counts.prevision,
        real_rate: inputs.rate(RatePolicy::Real),
        estimated_rate: inputs.rate(RatePolicy::Estimated),
    }
}

/// Whether a status kind is tracked per expertise.
pub(crate) fn tracked_per_expertise(kind: StatusKind) -> bool {
    kind != StatusKind::Interne
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Cell, RawGrid};
    use crate::sheet::in_scope_rows;

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

    #[test]
    fn test_four_cells_in_order() {
        let config = AggregatorConfig::default();
        let grid = RawGrid::new(vec![
            Vec::new(),
            Vec::new(),
            Vec::new(),
            person("Alice", "E-commerce", "DEV FRONT", &["Absence", "Interne"]),
            person("Bob", "Sur mesure", "DEV BACK", &["Non-Aff", "Prévision"]),
            person("Carol", "E-commerce", "CdP", &["Absence"]),
        ]);
        let rows = in_scope_rows(&grid, &config.layout, &config.in_scope_category);
        let metrics = compute_expertise_metrics(&rows, 1, &config);

        let names: Vec<&str> = metrics.iter().map(|m| m.expertise_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Front E-commerce", "Front Sur mesure", "Back E-commerce", "Back Sur mesure"]
        );

        assert_eq!(metrics[0].collaborator_names, vec!["Alice"]);
        assert_eq!(metrics[0].absence_days, 0.5);
        assert_eq!(metrics[0].real_rate, 100.0);

        assert!(metrics[1].is_empty());
        assert!(metrics[2].is_empty());

        let back_sm = &metrics[3];
        assert_eq!(back_sm.non_affected_days, 0.5);
        assert_eq!(back_sm.prevision_days, 0.5);
        assert_eq!(back_sm.estimated_rate, 50.0);
        assert_eq!(back_sm.real_rate, 0.0);
    }

    #[test]
    fn test_cell_of_person() {
        let p = PersonRecord {
            name: "x".into(),
            profile: Profile::DevBack,
            expertise: Expertise::Ecommerce,
            in_scope: true,
        };
        assert_eq!(ExpertiseCell::of(&p), Some(ExpertiseCell::BackEcommerce));

        let p = PersonRecord {
            profile: Profile::Graphiste,
            ..p
        };
        assert_eq!(ExpertiseCell::of(&p), None);
    }

    #[test]
    fn test_by_expertise_access() {
        let mut values: ByExpertise<u32> = ByExpertise::default();
        *values.get_mut(ExpertiseCell::BackSurMesure) += 3;
        assert_eq!(*values.get(ExpertiseCell::BackSurMesure), 3);
        assert_eq!(values.map(|v| v * 2).back_sur_mesure, 6);
    }
}

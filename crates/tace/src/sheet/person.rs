//! Person attributes read from the leading columns of a data row.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::SheetLayout;
use crate::input::{Cell, RawGrid};

/// Job profile of a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    DevFront,
    DevBack,
    Cdp,
    Graphiste,
    Other(String),
}

impl Profile {
    /// Exact match on the sheet's profile labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "DEV FRONT" => Profile::DevFront,
            "DEV BACK" => Profile::DevBack,
            "CdP" => Profile::Cdp,
            "GRAPHISTE" => Profile::Graphiste,
            other => Profile::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Profile::DevFront => "DEV FRONT",
            Profile::DevBack => "DEV BACK",
            Profile::Cdp => "CdP",
            Profile::Graphiste => "GRAPHISTE",
            Profile::Other(s) => s,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Business line of a developer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expertise {
    Ecommerce,
    SurMesure,
    Other(String),
}

impl Expertise {
    pub fn from_label(label: &str) -> Self {
        match label {
            "E-commerce" => Expertise::Ecommerce,
            "Sur mesure" => Expertise::SurMesure,
            other => Expertise::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Expertise::Ecommerce => "E-commerce",
            Expertise::SurMesure => "Sur mesure",
            Expertise::Other(s) => s,
        }
    }
}

impl fmt::Display for Expertise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attributes of one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Trimmed name; may be empty.
    pub name: String,
    pub profile: Profile,
    pub expertise: Expertise,
    pub in_scope: bool,
}

/// A classified data row: the person plus the raw row it was read from.
#[derive(Debug, Clone)]
pub struct SheetRow<'a> {
    pub person: PersonRecord,
    /// The whole row, indexed by absolute column.
    pub cells: &'a [Cell],
    first_slot_col: usize,
}

impl<'a> SheetRow<'a> {
    pub fn new(person: PersonRecord, cells: &'a [Cell], first_slot_col: usize) -> Self {
        Self {
            person,
            cells,
            first_slot_col,
        }
    }

    /// Half-day status cells, from the first slot column to the end of the row.
    pub fn status_cells(&self) -> &'a [Cell] {
        self.cells.get(self.first_slot_col..).unwrap_or(&[])
    }

    /// Cell at an absolute column index.
    pub fn cell(&self, col: usize) -> Option<&'a Cell> {
        self.cells.get(col)
    }
}

fn cell_text(row: &[Cell], col: usize) -> String {
    row.get(col).map(Cell::as_text).unwrap_or_default()
}

/// Read the person attributes of a data row.
pub fn read_person(row: &[Cell], layout: &SheetLayout, in_scope_category: &str) -> PersonRecord {
    PersonRecord {
        name: cell_text(row, layout.name_col),
        profile: Profile::from_label(&cell_text(row, layout.profile_col)),
        expertise: Expertise::from_label(&cell_text(row, layout.expertise_col)),
        in_scope: cell_text(row, layout.category_col) == in_scope_category,
    }
}

/// The person of a data row, or `None` when the row is outside the in-scope category.
pub fn classify_person(
    row: &[Cell],
    layout: &SheetLayout,
    in_scope_category: &str,
) -> Option<PersonRecord> {
    let person = read_person(row, layout, in_scope_category);
    person.in_scope.then_some(person)
}

/// Every in-scope data row of a grid, in sheet order.
pub fn in_scope_rows<'a>(
    grid: &'a RawGrid,
    layout: &SheetLayout,
    in_scope_category: &str,
) -> Vec<SheetRow<'a>> {
    grid.rows()
        .iter()
        .skip(layout.header_rows)
        .filter_map(|row| {
            classify_person(row, layout, in_scope_category)
                .map(|person| SheetRow::new(person, row, layout.first_slot_col))
        })
        .collect()
}

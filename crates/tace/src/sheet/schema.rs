//! Named column layout of a staffing sheet.

use serde::{Deserialize, Serialize};

/// Where each attribute lives in a month grid.
///
/// All indexes are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Column holding the person name.
    pub name_col: usize,
    /// Column holding the expertise ("E-commerce", "Sur mesure").
    pub expertise_col: usize,
    /// Column holding the profile ("DEV FRONT", "DEV BACK", "CdP", "GRAPHISTE").
    pub profile_col: usize,
    /// Column holding the contract category.
    pub category_col: usize,
    /// First half-day status column.
    pub first_slot_col: usize,
    /// Number of header rows before the first person row.
    pub header_rows: usize,
    /// Row holding Excel serial dates for each half-day column.
    pub date_header_row: usize,
    /// Upper bound on header columns examined by the slot scan.
    pub max_scan_iterations: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            name_col: 1,
            expertise_col: 2,
            profile_col: 3,
            category_col: 4,
            first_slot_col: 5,
            header_rows: 3,
            date_header_row: 2,
            max_scan_iterations: 100,
        }
    }
}

impl SheetLayout {
    /// Smallest row count a usable month grid can have.
    pub fn min_rows(&self) -> usize {
        self.header_rows + 1
    }
}

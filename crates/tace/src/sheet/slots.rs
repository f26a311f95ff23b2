//! Half-day slot detection in the date header row.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use super::schema::SheetLayout;
use crate::calendar::is_working_day;
use crate::input::{Cell, RawGrid};

/// Convert an Excel serial day number to a date.
///
/// Day 0 is 1899-12-30, which absorbs Excel's phantom 1900-02-29: serial 2 is
/// 1900-01-01 and 45931 is 2025-10-01. Fractional parts (times) are dropped.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// A (morning, afternoon) column pair sharing one header date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotDescriptor {
    pub morning_col: usize,
    pub afternoon_col: usize,
    pub date: NaiveDate,
}

impl SlotDescriptor {
    pub fn is_working_day(&self) -> bool {
        is_working_day(self.date)
    }
}

/// Walk the date header row and pair consecutive columns holding the same
/// serial date inside `target_month` (1-12).
///
/// Unpaired or out-of-month columns advance the scan by one; an accepted pair
/// consumes both columns. A pair repeating a date already seen is dropped, so
/// every date yields at most one slot. At most `layout.max_scan_iterations`
/// columns are examined.
pub fn scan_half_day_slots(
    grid: &RawGrid,
    layout: &SheetLayout,
    target_month: u32,
) -> Vec<SlotDescriptor> {
    let Some(header) = grid.row(layout.date_header_row) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut seen = HashSet::new();
    let mut col = layout.first_slot_col;
    let mut iterations = 0;

    while col < header.len() && iterations < layout.max_scan_iterations {
        iterations += 1;

        let serial = match header[col] {
            Cell::Number(n) if n != 0.0 => n,
            _ => {
                col += 1;
                continue;
            }
        };

        let date = match excel_serial_to_date(serial) {
            Some(d) if d.month() == target_month => d,
            _ => {
                col += 1;
                continue;
            }
        };

        let paired = matches!(header.get(col + 1), Some(Cell::Number(next)) if *next == serial);
        if !paired {
            col += 1;
            continue;
        }

        if !seen.insert(date) {
            warn!(column = col, %date, "duplicate date pair in header, ignored");
            col += 2;
            continue;
        }

        slots.push(SlotDescriptor {
            morning_col: col,
            afternoon_col: col + 1,
            date,
        });
        col += 2;
    }

    if col < header.len() && iterations >= layout.max_scan_iterations {
        warn!(
            column = col,
            width = header.len(),
            cap = layout.max_scan_iterations,
            "slot scan cap reached, remaining header columns ignored"
        );
    }
    debug!(slots = slots.len(), iterations, target_month, "scanned half-day slots");

    slots
}

/// Number of distinct non-empty values in the date header row.
///
/// A data-driven estimate of the days covered by the sheet, independent of
/// the calendar.
pub fn working_days_from_header(grid: &RawGrid, layout: &SheetLayout) -> usize {
    let Some(header) = grid.row(layout.date_header_row) else {
        return 0;
    };
    header
        .iter()
        .skip(layout.first_slot_col)
        .filter(|cell| !cell.is_empty())
        .map(Cell::as_text)
        .collect::<HashSet<_>>()
        .len()
}

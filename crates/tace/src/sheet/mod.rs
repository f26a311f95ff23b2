//! Interpretation of a month grid: column layout, persons, status cells and
//! half-day slots.

mod person;
mod schema;
mod slots;
mod status;

pub use person::{
    Expertise, PersonRecord, Profile, SheetRow, classify_person, in_scope_rows, read_person,
};
pub use schema::SheetLayout;
pub use slots::{SlotDescriptor, excel_serial_to_date, scan_half_day_slots, working_days_from_header};
pub use status::{ClassifiedCell, StatusKind, StatusRule, StatusRules};

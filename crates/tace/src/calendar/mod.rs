//! French working-day calendar.

mod holidays;
mod month;

pub use holidays::{FrenchHoliday, easter_sunday, french_holidays, is_french_holiday, is_working_day};
pub use month::{
    DEFAULT_WORKING_DAYS, FRENCH_MONTHS, MonthLabel, is_weekday, sort_month_labels,
    working_days_in_month,
};

//! French public holidays.
//!
//! Eight fixed-date holidays plus three Easter-relative ones. Easter Sunday is
//! computed with the Meeus/Jones/Butcher algorithm (Gregorian calendar).

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::month::is_weekday;

/// Fixed-date holidays as (month, day, name).
const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "Jour de l'an"),
    (5, 1, "Fête du Travail"),
    (5, 8, "Victoire 1945"),
    (7, 14, "Fête nationale"),
    (8, 15, "Assomption"),
    (11, 1, "Toussaint"),
    (11, 11, "Armistice 1918"),
    (12, 25, "Noël"),
];

/// Easter-relative holidays as (offset from Easter Sunday in days, name).
const EASTER_HOLIDAYS: [(i64, &str); 3] = [
    (1, "Lundi de Pâques"),
    (39, "Ascension"),
    (50, "Lundi de Pentecôte"),
];

/// A named public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrenchHoliday {
    pub date: NaiveDate,
    pub name: &'static str,
}

/// Easter Sunday of `year`.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// All eleven holidays of `year`, sorted by date.
pub fn french_holidays(year: i32) -> Vec<FrenchHoliday> {
    let mut holidays: Vec<FrenchHoliday> = FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(month, day, name)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| FrenchHoliday { date, name })
        })
        .collect();

    if let Some(easter) = easter_sunday(year) {
        holidays.extend(EASTER_HOLIDAYS.iter().map(|&(offset, name)| FrenchHoliday {
            date: easter + Duration::days(offset),
            name,
        }));
    }

    holidays.sort_by_key(|h| h.date);
    holidays
}

/// Whether `date` is a French public holiday.
pub fn is_french_holiday(date: NaiveDate) -> bool {
    let fixed = FIXED_HOLIDAYS
        .iter()
        .any(|&(month, day, _)| date.month() == month && date.day() == day);
    if fixed {
        return true;
    }

    match easter_sunday(date.year()) {
        Some(easter) => EASTER_HOLIDAYS
            .iter()
            .any(|&(offset, _)| easter + Duration::days(offset) == date),
        None => false,
    }
}

/// A weekday that is not a public holiday.
pub fn is_working_day(date: NaiveDate) -> bool {
    is_weekday(date) && !is_french_holiday(date)
}

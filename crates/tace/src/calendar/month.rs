//! French month labels ("Octobre 2025") and weekday counting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TaceError};

/// French month names, January first. Accents are part of the name.
pub const FRENCH_MONTHS: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Working days reported when a month label cannot be parsed.
pub const DEFAULT_WORKING_DAYS: u32 = 22;

static MONTH_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(Janvier|Février|Mars|Avril|Mai|Juin|Juillet|Août|Septembre|Octobre|Novembre|Décembre)\s+(\d{4})$",
    )
    .unwrap()
});

/// A calendar month identified by a French label such as "Octobre 2025".
///
/// Ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthLabel")]
pub struct MonthLabel {
    year: i32,
    /// 1-based, always within 1..=12.
    month: u32,
}

/// Unchecked serialized form of [`MonthLabel`].
#[derive(Deserialize)]
struct RawMonthLabel {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthLabel> for MonthLabel {
    type Error = TaceError;

    fn try_from(raw: RawMonthLabel) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl MonthLabel {
    /// Build a label from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TaceError::InvalidMonthLabel(format!("{month}/{year}")));
        }
        Ok(Self { year, month })
    }

    /// Parse "<FrenchMonthName> <4-digit year>".
    pub fn parse(label: &str) -> Result<Self> {
        let caps = MONTH_LABEL
            .captures(label.trim())
            .ok_or_else(|| TaceError::InvalidMonthLabel(label.to_string()))?;

        let month = FRENCH_MONTHS
            .iter()
            .position(|name| *name == &caps[1])
            .map(|idx| idx as u32 + 1)
            .ok_or_else(|| TaceError::InvalidMonthLabel(label.to_string()))?;
        let year: i32 = caps[2]
            .parse()
            .map_err(|_| TaceError::InvalidMonthLabel(label.to_string()))?;

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// French name of the month.
    pub fn name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|idx| FRENCH_MONTHS.get(idx as usize))
            .copied()
            .unwrap_or("?")
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt())
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => first.iter_days().take_while(|d| *d <= last).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of Monday–Friday days in the month.
    pub fn weekday_count(&self) -> u32 {
        self.days().iter().filter(|d| is_weekday(**d)).count() as u32
    }

    /// The label of the previous month.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

impl FromStr for MonthLabel {
    type Err = TaceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// True for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count the weekdays of the month named by `label`.
///
/// Display-only callers rely on this never failing: an unparseable label
/// yields [`DEFAULT_WORKING_DAYS`] and a warning event.
pub fn working_days_in_month(label: &str) -> u32 {
    match MonthLabel::parse(label) {
        Ok(month) => month.weekday_count(),
        Err(_) => {
            warn!(label, default = DEFAULT_WORKING_DAYS, "invalid month label, using default working days");
            DEFAULT_WORKING_DAYS
        }
    }
}

/// Keep the labels that parse as months and return them in chronological order.
pub fn sort_month_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut parsed: Vec<(MonthLabel, String)> = labels
        .iter()
        .filter_map(|l| {
            let raw = l.as_ref();
            MonthLabel::parse(raw).ok().map(|m| (m, raw.to_string()))
        })
        .collect();
    parsed.sort_by_key(|(m, _)| *m);
    parsed.into_iter().map(|(_, raw)| raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        let m = MonthLabel::parse("Octobre 2025").unwrap();
        assert_eq!(m, MonthLabel::new(2025, 10).unwrap());
        assert_eq!((m.year(), m.month()), (2025, 10));
        assert_eq!(m.to_string(), "Octobre 2025");

        let m = MonthLabel::parse("Décembre 2025").unwrap();
        assert_eq!(m.month(), 12);
        assert_eq!(m.name(), "Décembre");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(MonthLabel::parse("Octobre").is_err());
        assert!(MonthLabel::parse("October 2025").is_err());
        assert!(MonthLabel::parse("Decembre 2025").is_err());
        assert!(MonthLabel::parse("Octobre 25").is_err());
        assert!(MonthLabel::parse("").is_err());
    }

    #[test]
    fn test_working_days_in_month() {
        // October 2025: 23 weekdays
        assert_eq!(working_days_in_month("Octobre 2025"), 23);
        // February 2024 (leap year): 21 weekdays
        assert_eq!(working_days_in_month("Février 2024"), 21);
        // November 2025: 20 weekdays
        assert_eq!(working_days_in_month("Novembre 2025"), 20);
    }

    #[test]
    fn test_working_days_default_on_bad_label() {
        assert_eq!(working_days_in_month("pas un mois"), DEFAULT_WORKING_DAYS);
        assert_eq!(working_days_in_month("Octobre deux-mille"), DEFAULT_WORKING_DAYS);
    }

    #[test]
    fn test_last_day() {
        let feb = MonthLabel::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29));
        let dec = MonthLabel::new(2025, 12).unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(dec.days().len(), 31);
    }

    #[test]
    fn test_chronological_order() {
        let labels = ["Janvier 2026", "Décembre 2025", "Feuille 3", "Mars 2025"];
        assert_eq!(
            sort_month_labels(&labels),
            vec!["Mars 2025", "Décembre 2025", "Janvier 2026"]
        );
    }

    #[test]
    fn test_deserialize_checks_range() {
        let m: MonthLabel = serde_json::from_str(r#"{"year":2025,"month":10}"#).unwrap();
        assert_eq!(m.to_string(), "Octobre 2025");

        assert!(serde_json::from_str::<MonthLabel>(r#"{"year":2025,"month":13}"#).is_err());
        assert!(serde_json::from_str::<MonthLabel>(r#"{"year":2025,"month":0}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let m = MonthLabel::new(2026, 1).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"year":2026,"month":1}"#);
    }

    #[test]
    fn test_previous() {
        let jan = MonthLabel::new(2026, 1).unwrap();
        assert_eq!(jan.previous(), MonthLabel::new(2025, 12).unwrap());
    }
}

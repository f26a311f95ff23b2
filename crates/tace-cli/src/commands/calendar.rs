//! Calendar command - working days and holidays of a month.

use chrono::Datelike;
use colored::Colorize;
use tace::calendar::{MonthLabel, french_holidays, is_working_day};

const WEEKDAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

pub fn run(label: &str) -> Result<(), Box<dyn std::error::Error>> {
    let month = MonthLabel::parse(label)?;
    let days = month.days();

    let worked = days.iter().filter(|d| is_working_day(**d)).count();
    let holidays: Vec<_> = french_holidays(month.year())
        .into_iter()
        .filter(|h| h.date.month() == month.month())
        .collect();

    println!("{}", month.to_string().cyan().bold());
    println!(
        "  {:28} {}",
        "Jours de semaine",
        month.weekday_count().to_string().white().bold()
    );
    println!(
        "  {:28} {}",
        "Jours ouvrés (hors fériés)",
        worked.to_string().white().bold()
    );

    if holidays.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Jours fériés:".yellow().bold());
    for holiday in &holidays {
        let weekday = WEEKDAYS[holiday.date.weekday().num_days_from_monday() as usize];
        println!(
            "  {} {:9} {}",
            holiday.date.format("%d/%m/%Y"),
            weekday,
            holiday.name
        );
    }

    Ok(())
}

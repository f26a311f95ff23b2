//! Daily command - consolidated day-by-day series.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tace::consolidate::aggregate_daily_metrics;
use tace::metrics::DailyMetrics;

use super::load;

pub fn run(
    files: Vec<PathBuf>,
    rates: bool,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = load::workbook(&files, config, json_output)?;

    if rates {
        let series: Vec<DailyMetrics> = workbook
            .months
            .iter()
            .flat_map(|m| m.daily_metrics.iter().cloned())
            .collect();
        let points = aggregate_daily_metrics(&series);

        if json_output {
            println!("{}", serde_json::to_string_pretty(&points)?);
            return Ok(());
        }

        println!(
            "{}",
            format!(
                "{:12} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8} {:>8}",
                "Date", "Front", "Back", "E-comm.", "Sur mes.", "F-EC", "B-EC", "F-SM", "B-SM"
            )
            .yellow()
            .bold()
        );
        for p in &points {
            println!(
                "{:12} {:>8.2} {:>8.2} {:>10.2} {:>10.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
                p.date,
                p.front_rate,
                p.back_rate,
                p.ecommerce_rate,
                p.sur_mesure_rate,
                p.ecommerce_front_rate,
                p.ecommerce_back_rate,
                p.sur_mesure_front_rate,
                p.sur_mesure_back_rate
            );
        }
        return Ok(());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&workbook.consolidated)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:12} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "Date", "Effec.", "Abs.", "Int.", "N-Aff", "Prév.", "Réel", "Estimé"
        )
        .yellow()
        .bold()
    );
    for day in &workbook.consolidated {
        let slot = &day.slot.global;
        println!(
            "{:12} {:>6} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.2} {:>8.2}",
            day.date,
            day.headcounts.total,
            slot.absences,
            slot.interne,
            slot.non_affected,
            slot.prevision,
            day.global_real_rate,
            day.global_estimated_rate
        );
    }

    println!();
    println!(
        "{} days across {} months",
        workbook.consolidated.len().to_string().white().bold(),
        workbook.months.len()
    );

    Ok(())
}

//! Analyze command - team and expertise tables per month.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tace::report::{RowKind, TableRow, expertise_rows, team_rows};
use tace::{AlertThresholds, MonthAnalysis, RateBand};

use super::load;

pub fn run(
    files: Vec<PathBuf>,
    month: Option<String>,
    json_output: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = load::analyzer(config)?;
    let sheets = load::load_sheets(&files, month.as_deref())?;

    // A single month is analyzed directly so its own error is reported.
    let months: Vec<MonthAnalysis> = if let [(label, grid)] = sheets.as_slice() {
        vec![analyzer.analyze_month(label, grid)?]
    } else {
        let workbook = analyzer.analyze_workbook(&sheets)?;
        if !json_output {
            load::report_skipped(&workbook.skipped);
        }
        workbook.months
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&months)?);
        return Ok(());
    }

    let total_team_name = &analyzer.config().aggregator.total_team_name;
    let thresholds = &analyzer.config().thresholds;

    for analysis in &months {
        let rows = team_rows(
            &analysis.label,
            analysis.working_days,
            &analysis.team_metrics,
            total_team_name,
        );
        print_rows(&rows, thresholds);

        let expertise = expertise_rows(&analysis.expertise_metrics);
        if !expertise.is_empty() {
            println!();
            println!("{}", "Expertises".yellow().bold());
            print_rows(&expertise, thresholds);
        }

        if verbose {
            println!();
            println!(
                "{} {} half-day slots, {} dated columns, {}",
                "Grid:".dimmed(),
                analysis.daily_metrics.len(),
                analysis.header_days,
                analysis.content_hash.dimmed()
            );
        }
        println!();
    }

    Ok(())
}

fn print_rows(rows: &[TableRow], thresholds: &AlertThresholds) {
    for row in rows {
        match row.kind {
            RowKind::Title => {
                println!();
                println!("{}", row.label.cyan().bold());
            }
            RowKind::Rate => {
                let rate = row.number.unwrap_or_default();
                let value = match RateBand::classify_with(rate, thresholds) {
                    RateBand::Good => row.value.green(),
                    RateBand::Average => row.value.yellow(),
                    RateBand::Low => row.value.red(),
                };
                println!("  {:45} {}", row.label, value.bold());
            }
            RowKind::Value => println!("  {:45} {}", row.label, row.value.white()),
        }
    }
}

//! Alerts command - thresholds and trends of the latest month.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tace::AlertLevel;

use super::load;

fn format_trend(trend: Option<f64>) -> String {
    match trend {
        Some(t) if t > 0.0 => format!("+{t:.2}").green().to_string(),
        Some(t) if t < 0.0 => format!("{t:.2}").red().to_string(),
        Some(_) => "=".to_string(),
        None => "-".dimmed().to_string(),
    }
}

pub fn run(
    files: Vec<PathBuf>,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = load::workbook(&files, config, json_output)?;

    if json_output {
        let output = serde_json::json!({
            "summaries": workbook.summaries,
            "alerts": workbook.alerts,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Monthly rates:".yellow().bold());
    for summary in &workbook.summaries {
        let trends = summary.trends.unwrap_or_default();
        match summary.totals {
            Some(totals) => println!(
                "  {:16} réel {:>6.2} % ({})  estimé {:>6.2} % ({})",
                summary.month.to_string(),
                totals.real_rate,
                format_trend(trends.real_rate),
                totals.estimated_rate,
                format_trend(trends.estimated_rate)
            ),
            None => println!("  {:16} {}", summary.month.to_string(), "no data".dimmed()),
        }
    }
    println!();

    println!("{}", "Alerts:".yellow().bold());
    for alert in &workbook.alerts {
        let marker = match alert.level {
            AlertLevel::Critical => "✗".red(),
            AlertLevel::Warning => "⚠".yellow(),
            AlertLevel::Info => "✓".green(),
        };
        println!("  {} {}", marker, alert.title.bold());
        println!("    {}", alert.message);
    }

    Ok(())
}

//! Projects command - days spent per project.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tace::metrics::ProjectTotals;

use super::load;

pub fn run(
    file: PathBuf,
    month: Option<String>,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = load::analyzer(config)?;
    let sheets = load::load_sheets(std::slice::from_ref(&file), month.as_deref())?;
    let Some((label, grid)) = sheets.first() else {
        return Err("No sheet loaded".into());
    };
    let analysis = analyzer.analyze_month(label, grid)?;
    let projects = &analysis.project_statistics;

    if json_output {
        println!("{}", serde_json::to_string_pretty(projects)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Projects for".cyan().bold(),
        analysis.label.to_string().white()
    );
    println!();

    if projects.is_empty() {
        println!("{}", "No project allocation found.".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:30} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "Projet", "Total", "Front", "Back", "CdP", "Design"
        )
        .yellow()
        .bold()
    );
    for p in projects {
        println!(
            "{:30} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            p.project_name, p.total_days, p.front_days, p.back_days, p.cdp_days, p.design_days
        );
    }

    let totals = ProjectTotals::from_projects(projects);
    println!(
        "{}",
        format!(
            "{:30} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            "Total",
            totals.total_days,
            totals.front_days,
            totals.back_days,
            totals.cdp_days,
            totals.design_days
        )
        .bold()
    );

    Ok(())
}

//! Export command - write metrics as CSV.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use tace::WorkbookAnalysis;

use super::load;
use crate::cli::ExportKind;

#[derive(Serialize)]
struct SummaryRecord {
    month: String,
    working_days: u32,
    real_rate: Option<f64>,
    estimated_rate: Option<f64>,
    real_rate_trend: Option<f64>,
    front_ecommerce_rate: Option<f64>,
    back_ecommerce_rate: Option<f64>,
    front_sur_mesure_rate: Option<f64>,
    back_sur_mesure_rate: Option<f64>,
    daily_front_rate: f64,
    daily_back_rate: f64,
    daily_ecommerce_rate: f64,
    daily_sur_mesure_rate: f64,
}

#[derive(Serialize)]
struct ProjectRecord<'a> {
    month: String,
    project: &'a str,
    total_days: f64,
    front_days: f64,
    back_days: f64,
    cdp_days: f64,
    design_days: f64,
}

#[derive(Serialize)]
struct DailyRecord<'a> {
    date: &'a str,
    half_days: usize,
    headcount: f64,
    absences: f64,
    interne: f64,
    non_affected: f64,
    prevision: f64,
    real_rate: f64,
    estimated_rate: f64,
}

pub fn run(
    files: Vec<PathBuf>,
    kind: ExportKind,
    output: PathBuf,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = load::workbook(&files, config, false)?;

    let mut writer = csv::Writer::from_path(&output)?;
    let count = match kind {
        ExportKind::Summary => write_summary(&mut writer, &workbook)?,
        ExportKind::Projects => write_projects(&mut writer, &workbook)?,
        ExportKind::Daily => write_daily(&mut writer, &workbook)?,
    };
    writer.flush()?;

    println!(
        "{} {} {} rows to {}",
        "Exported".green().bold(),
        count,
        kind,
        output.display().to_string().white()
    );

    Ok(())
}

fn write_summary<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    workbook: &WorkbookAnalysis,
) -> Result<usize, csv::Error> {
    for (analysis, summary) in workbook.months.iter().zip(&workbook.summaries) {
        writer.serialize(SummaryRecord {
            month: summary.month.to_string(),
            working_days: analysis.working_days,
            real_rate: summary.totals.map(|t| t.real_rate),
            estimated_rate: summary.totals.map(|t| t.estimated_rate),
            real_rate_trend: summary.trends.and_then(|t| t.real_rate),
            front_ecommerce_rate: summary.specific.front_ecommerce_rate,
            back_ecommerce_rate: summary.specific.back_ecommerce_rate,
            front_sur_mesure_rate: summary.specific.front_sur_mesure_rate,
            back_sur_mesure_rate: summary.specific.back_sur_mesure_rate,
            daily_front_rate: summary.daily.front_rate,
            daily_back_rate: summary.daily.back_rate,
            daily_ecommerce_rate: summary.daily.ecommerce_rate,
            daily_sur_mesure_rate: summary.daily.sur_mesure_rate,
        })?;
    }
    Ok(workbook.summaries.len())
}

fn write_projects<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    workbook: &WorkbookAnalysis,
) -> Result<usize, csv::Error> {
    let mut count = 0;
    for analysis in &workbook.months {
        for p in &analysis.project_statistics {
            writer.serialize(ProjectRecord {
                month: analysis.label.to_string(),
                project: &p.project_name,
                total_days: p.total_days,
                front_days: p.front_days,
                back_days: p.back_days,
                cdp_days: p.cdp_days,
                design_days: p.design_days,
            })?;
            count += 1;
        }
    }
    Ok(count)
}

fn write_daily<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    workbook: &WorkbookAnalysis,
) -> Result<usize, csv::Error> {
    for day in &workbook.consolidated {
        let slot = &day.slot.global;
        writer.serialize(DailyRecord {
            date: &day.date,
            half_days: day.half_days,
            headcount: day.headcounts.total,
            absences: slot.absences,
            interne: slot.interne,
            non_affected: slot.non_affected,
            prevision: slot.prevision,
            real_rate: day.global_real_rate,
            estimated_rate: day.global_estimated_rate,
        })?;
    }
    Ok(workbook.consolidated.len())
}

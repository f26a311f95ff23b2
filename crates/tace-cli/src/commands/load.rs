//! Shared loading: configuration, month files and workbook analysis.

use std::error::Error;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tace::{Analyzer, AnalyzerConfig, GridParser, RawGrid, SkippedMonth, WorkbookAnalysis};
use tracing::debug;

/// Analyzer built from `--config`, or the defaults.
pub fn analyzer(config: Option<&Path>) -> Result<Analyzer, Box<dyn Error>> {
    let config = match config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    Ok(Analyzer::with_config(config))
}

/// "octobre_2025" or "Octobre-2025" -> "Octobre 2025".
pub fn label_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default();
    let mut chars = stem.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read every file as one month sheet.
///
/// `month` overrides the label and is only accepted with a single file.
pub fn load_sheets(
    files: &[PathBuf],
    month: Option<&str>,
) -> Result<Vec<(String, RawGrid)>, Box<dyn Error>> {
    if month.is_some() && files.len() > 1 {
        return Err("--month can only be used with a single file".into());
    }

    let parser = GridParser::new();
    let mut sheets = Vec::with_capacity(files.len());
    for file in files {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
        let (grid, source) = parser.parse_file(file)?;
        let label = month
            .map(str::to_string)
            .unwrap_or_else(|| label_from_stem(file));
        debug!(file = %source.file, %label, rows = source.row_count, "loaded month sheet");
        sheets.push((label, grid));
    }
    Ok(sheets)
}

/// Load and analyze files as one workbook, reporting skipped months.
pub fn workbook(
    files: &[PathBuf],
    config: Option<&Path>,
    quiet: bool,
) -> Result<WorkbookAnalysis, Box<dyn Error>> {
    let analyzer = analyzer(config)?;
    let sheets = load_sheets(files, None)?;
    let workbook = analyzer.analyze_workbook(&sheets)?;

    if !quiet {
        report_skipped(&workbook.skipped);
    }

    Ok(workbook)
}

pub fn report_skipped(skipped: &[SkippedMonth]) {
    for month in skipped {
        eprintln!(
            "{} {} ({})",
            "Skipped".yellow().bold(),
            month.label,
            month.reason.dimmed()
        );
    }
}

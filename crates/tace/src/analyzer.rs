//! Main analyzer and public API.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alerts::{Alert, AlertThresholds, generate_alerts};
use crate::calendar::{MonthLabel, working_days_in_month};
use crate::config::AggregatorConfig;
use crate::consolidate::{ConsolidatedDailyMetric, consolidate_daily_metrics, merge_monthly_summaries};
use crate::error::{Result, TaceError};
use crate::input::RawGrid;
use crate::metrics::{
    DailyMetrics, ExpertiseMetrics, MonthSummary, ProjectStatistics, TeamMetrics,
    compute_daily_metrics, compute_expertise_metrics, compute_project_statistics,
    compute_team_metrics,
};
use crate::sheet::{in_scope_rows, working_days_from_header};

/// Configuration for workbook analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// How month grids are read and grouped.
    pub aggregator: AggregatorConfig,
    /// Alert thresholds.
    pub thresholds: AlertThresholds,
}

impl AnalyzerConfig {
    /// Load a configuration file. Missing sections take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| TaceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AnalyzerConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                TaceError::Config(format!("Failed to parse '{}': {}", path.display(), e))
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.aggregator.validate()?;
        if self.thresholds.critical > self.thresholds.warning {
            return Err(TaceError::Config(format!(
                "critical threshold ({}) is above warning threshold ({})",
                self.thresholds.critical, self.thresholds.warning
            )));
        }
        Ok(())
    }
}

/// Everything derived from one month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAnalysis {
    pub label: MonthLabel,
    /// Weekdays of the month.
    pub working_days: u32,
    /// Distinct dates found in the header row.
    pub header_days: usize,
    /// `sha256:` hash of the grid cells.
    pub content_hash: String,
    pub team_metrics: Vec<TeamMetrics>,
    pub expertise_metrics: Vec<ExpertiseMetrics>,
    pub daily_metrics: Vec<DailyMetrics>,
    pub project_statistics: Vec<ProjectStatistics>,
    pub summary: MonthSummary,
}

/// A month left out of a workbook analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMonth {
    pub label: String,
    pub reason: String,
}

/// Result of analyzing several months together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookAnalysis {
    /// Valid months, in chronological order.
    pub months: Vec<MonthAnalysis>,
    /// Month summaries with trends.
    pub summaries: Vec<MonthSummary>,
    /// Day-averaged series across every month.
    pub consolidated: Vec<ConsolidatedDailyMetric>,
    pub alerts: Vec<Alert>,
    pub skipped: Vec<SkippedMonth>,
}

/// Runs the per-month pipeline and the cross-month consolidation.
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one month grid.
    ///
    /// Fails when the label is not a month, or with
    /// [`TaceError::InsufficientData`] when the grid has too few rows or no
    /// working-day slot.
    pub fn analyze_month(&self, label: &str, grid: &RawGrid) -> Result<MonthAnalysis> {
        let month = MonthLabel::parse(label)?;
        let config = &self.config.aggregator;

        let daily_metrics = compute_daily_metrics(grid, &month, config)?;

        let working_days = working_days_in_month(label);
        let rows = in_scope_rows(grid, &config.layout, &config.in_scope_category);
        let team_metrics = compute_team_metrics(&rows, working_days, config);
        let expertise_metrics = compute_expertise_metrics(&rows, working_days, config);
        let project_statistics = compute_project_statistics(grid, config);

        let summary = MonthSummary::new(
            month,
            &team_metrics,
            &expertise_metrics,
            &daily_metrics,
            &config.total_team_name,
        );

        debug!(
            month = %month,
            working_days,
            persons = rows.len(),
            half_days = daily_metrics.len(),
            projects = project_statistics.len(),
            "analyzed month"
        );

        Ok(MonthAnalysis {
            label: month,
            working_days,
            header_days: working_days_from_header(grid, &config.layout),
            content_hash: grid.content_hash(),
            team_metrics,
            expertise_metrics,
            daily_metrics,
            project_statistics,
            summary,
        })
    }

    /// Analyze every month of a workbook.
    ///
    /// Sheets whose label is not a month, and months without usable data, are
    /// skipped. Fails with [`TaceError::NoValidMonth`] when nothing is left.
    pub fn analyze_workbook(&self, sheets: &[(String, RawGrid)]) -> Result<WorkbookAnalysis> {
        self.analyze_workbook_with(sheets, |label, grid| self.analyze_month(label, grid))
    }

    /// Same as [`Analyzer::analyze_workbook`], reusing cached month results.
    pub fn analyze_workbook_cached(
        &self,
        sheets: &[(String, RawGrid)],
        cache: &mut MonthCache,
    ) -> Result<WorkbookAnalysis> {
        self.analyze_workbook_with(sheets, |label, grid| {
            cache.get_or_analyze(self, label, grid).cloned()
        })
    }

    fn analyze_workbook_with<F>(
        &self,
        sheets: &[(String, RawGrid)],
        mut analyze: F,
    ) -> Result<WorkbookAnalysis>
    where
        F: FnMut(&str, &RawGrid) -> Result<MonthAnalysis>,
    {
        let mut months = Vec::new();
        let mut skipped = Vec::new();

        for (label, grid) in sheets {
            match analyze(label, grid) {
                Ok(analysis) => months.push(analysis),
                Err(err) => {
                    info!(month = %label, reason = %err, "skipping month");
                    skipped.push(SkippedMonth {
                        label: label.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if months.is_empty() {
            return Err(TaceError::NoValidMonth);
        }

        months.sort_by_key(|m| m.label);

        let summaries =
            merge_monthly_summaries(months.iter().map(|m| m.summary.clone()).collect());
        let series: Vec<Vec<DailyMetrics>> =
            months.iter().map(|m| m.daily_metrics.clone()).collect();
        let consolidated = consolidate_daily_metrics(&series);
        let alerts = generate_alerts(&summaries, &self.config.thresholds);

        Ok(WorkbookAnalysis {
            months,
            summaries,
            consolidated,
            alerts,
            skipped,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoizes month analyses by (month label, grid content hash).
///
/// A changed grid produces a new hash and is analyzed again.
#[derive(Debug, Default)]
pub struct MonthCache {
    entries: HashMap<(String, String), MonthAnalysis>,
    hits: usize,
    misses: usize,
}

impl MonthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached analysis, computing it on a miss. Failures are not cached.
    pub fn get_or_analyze(
        &mut self,
        analyzer: &Analyzer,
        label: &str,
        grid: &RawGrid,
    ) -> Result<&MonthAnalysis> {
        let key = (label.to_string(), grid.content_hash());
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let analysis = analyzer.analyze_month(label, grid)?;
            self.entries.insert(key.clone(), analysis);
        }
        self.entries
            .get(&key)
            .ok_or_else(|| TaceError::EmptyData(format!("cache entry for '{label}'")))
    }

    /// Drop every entry for a month label.
    pub fn invalidate(&mut self, label: &str) {
        self.entries.retain(|(l, _), _| l != label);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;

    const OCT_1: f64 = 45931.0;

    fn month_grid(serial: f64, cells: &[&str]) -> RawGrid {
        let mut header = vec![Cell::Empty; 5];
        header.extend([Cell::Number(serial), Cell::Number(serial)]);
        let mut person = vec![
            Cell::Empty,
            Cell::from("Alice"),
            Cell::from("E-commerce"),
            Cell::from("DEV FRONT"),
            Cell::from("CDS"),
        ];
        person.extend(cells.iter().map(|c| Cell::from(*c)));
        RawGrid::new(vec![Vec::new(), Vec::new(), header, person])
    }

    #[test]
    fn test_analyze_month() {
        let analyzer = Analyzer::new();
        let result = analyzer
            .analyze_month("Octobre 2025", &month_grid(OCT_1, &["Absence", "Boutique"]))
            .unwrap();

        assert_eq!(result.working_days, 23);
        assert_eq!(result.header_days, 1);
        assert_eq!(result.team_metrics[0].absence_days, 0.5);
        assert_eq!(result.daily_metrics.len(), 2);
        assert_eq!(result.project_statistics[0].project_name, "Boutique");
        assert!(result.summary.totals.is_some());
    }

    #[test]
    fn test_bad_label_rejected() {
        let analyzer = Analyzer::new();
        assert!(matches!(
            analyzer.analyze_month("Feuille 1", &month_grid(OCT_1, &[])),
            Err(TaceError::InvalidMonthLabel(_))
        ));
    }

    #[test]
    fn test_workbook_skips_and_orders() {
        let analyzer = Analyzer::new();
        // 2025-11-03 is a Monday
        let nov_3 = OCT_1 + 33.0;
        let sheets = vec![
            ("Novembre 2025".to_string(), month_grid(nov_3, &["Non-Aff", ""])),
            ("Synthèse".to_string(), month_grid(OCT_1, &[])),
            ("Octobre 2025".to_string(), month_grid(OCT_1, &[])),
            ("Décembre 2025".to_string(), RawGrid::new(vec![Vec::new()])),
        ];
        let workbook = analyzer.analyze_workbook(&sheets).unwrap();

        let labels: Vec<String> = workbook.months.iter().map(|m| m.label.to_string()).collect();
        assert_eq!(labels, vec!["Octobre 2025", "Novembre 2025"]);
        assert_eq!(workbook.skipped.len(), 2);
        assert_eq!(workbook.consolidated.len(), 2);
        assert!(workbook.summaries[1].trends.is_some());
        assert!(!workbook.alerts.is_empty());
    }

    #[test]
    fn test_workbook_without_valid_month() {
        let analyzer = Analyzer::new();
        let sheets = vec![("Octobre 2025".to_string(), RawGrid::new(vec![Vec::new()]))];
        assert!(matches!(
            analyzer.analyze_workbook(&sheets),
            Err(TaceError::NoValidMonth)
        ));
    }

    #[test]
    fn test_cache_by_content() {
        let analyzer = Analyzer::new();
        let mut cache = MonthCache::new();
        let grid = month_grid(OCT_1, &["Absence"]);

        cache.get_or_analyze(&analyzer, "Octobre 2025", &grid).unwrap();
        cache.get_or_analyze(&analyzer, "Octobre 2025", &grid).unwrap();
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);

        let changed = month_grid(OCT_1, &["Interne"]);
        let analysis = cache.get_or_analyze(&analyzer, "Octobre 2025", &changed).unwrap();
        assert_eq!(analysis.team_metrics[0].interne_days, 0.5);
        assert_eq!(cache.len(), 2);

        cache.invalidate("Octobre 2025");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_config_load_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"thresholds": {"critical": 60}}"#).unwrap();

        let config = AnalyzerConfig::load(file.path()).unwrap();
        assert_eq!(config.thresholds.critical, 60.0);
        assert_eq!(config.thresholds.warning, 85.0);
        assert_eq!(config.aggregator.total_team_name, "Total CDS");
    }

    #[test]
    fn test_config_thresholds_checked() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"thresholds": {"critical": 90}}"#).unwrap();

        assert!(matches!(
            AnalyzerConfig::load(file.path()),
            Err(TaceError::Config(_))
        ));
    }

    #[test]
    fn test_cached_workbook() {
        let analyzer = Analyzer::new();
        let mut cache = MonthCache::new();
        let sheets = vec![("Octobre 2025".to_string(), month_grid(OCT_1, &[]))];

        analyzer.analyze_workbook_cached(&sheets, &mut cache).unwrap();
        analyzer.analyze_workbook_cached(&sheets, &mut cache).unwrap();
        assert_eq!(cache.hits(), 1);
    }
}

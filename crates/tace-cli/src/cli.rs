//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TACE: activity-rate metrics for half-day staffing sheets
#[derive(Parser)]
#[command(name = "tace")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file (layout, teams, status keywords, thresholds)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Team and expertise tables of each month
    Analyze {
        /// Month exports (CSV/TSV or sheet-values JSON), named after their month
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Month label, e.g. "Octobre 2025" (single file only)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Day-by-day series across every loaded month
    Daily {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Show per-team rates instead of counters
        #[arg(long)]
        rates: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Days spent per project
    Projects {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Month label (default: file stem)
        #[arg(short, long)]
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Threshold and trend alerts for the latest month
    Alerts {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export metrics as CSV
    Export {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// What to export
        #[arg(short, long, default_value = "summary")]
        kind: ExportKind,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Working days and public holidays of a month
    Calendar {
        /// Month label, e.g. "Mai 2025"
        #[arg(value_name = "MONTH")]
        month: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportKind {
    /// One row per month
    #[default]
    Summary,
    /// One row per (month, project)
    Projects,
    /// One row per calendar day
    Daily,
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(ExportKind::Summary),
            "projects" => Ok(ExportKind::Projects),
            "daily" => Ok(ExportKind::Daily),
            _ => Err(format!(
                "Unknown export kind: {}. Use summary, projects, or daily.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::Summary => write!(f, "summary"),
            ExportKind::Projects => write!(f, "projects"),
            ExportKind::Daily => write!(f, "daily"),
        }
    }
}

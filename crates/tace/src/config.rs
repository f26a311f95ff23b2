//! Aggregation configuration and its JSON persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaceError};
use crate::sheet::{SheetLayout, StatusRules};

/// A named team selected by an exact profile match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFilter {
    /// Display name, e.g. "Equipe Front".
    pub name: String,
    /// Profile column value selecting the members.
    pub profile: String,
}

impl TeamFilter {
    pub fn new(name: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: profile.into(),
        }
    }
}

/// Everything the aggregator needs to read a month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Column layout of the sheet.
    pub layout: SheetLayout,
    /// Contract category counted toward capacity.
    pub in_scope_category: String,
    /// Name of the synthetic row grouping every in-scope person.
    pub total_team_name: String,
    /// Teams reported after the total row, in order.
    pub teams: Vec<TeamFilter>,
    /// Status keyword table.
    pub status_rules: StatusRules,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            in_scope_category: "CDS".to_string(),
            total_team_name: "Total CDS".to_string(),
            teams: vec![
                TeamFilter::new("Equipe Front", "DEV FRONT"),
                TeamFilter::new("Equipe Back", "DEV BACK"),
                TeamFilter::new("Equipe CdP", "CdP"),
                TeamFilter::new("Equipe Design", "GRAPHISTE"),
            ],
            status_rules: StatusRules::default(),
        }
    }
}

impl AggregatorConfig {
    /// Check values that would make every aggregation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.in_scope_category.trim().is_empty() {
            return Err(TaceError::Config(
                "in_scope_category must not be empty".to_string(),
            ));
        }
        if self.layout.date_header_row >= self.layout.header_rows {
            return Err(TaceError::Config(format!(
                "date_header_row ({}) must be one of the {} header rows",
                self.layout.date_header_row, self.layout.header_rows
            )));
        }
        if self.layout.max_scan_iterations == 0 {
            return Err(TaceError::Config(
                "max_scan_iterations must be positive".to_string(),
            ));
        }
        if let Some(team) = self.teams.iter().find(|t| t.name.trim().is_empty()) {
            return Err(TaceError::Config(format!(
                "team filter for profile '{}' has no name",
                team.profile
            )));
        }
        Ok(())
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| TaceError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| TaceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }

    /// Load a configuration file. Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| TaceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let config: AggregatorConfig = serde_json::from_reader(reader).map_err(|e| {
            TaceError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AggregatorConfig::default();
        assert_eq!(config.teams.len(), 4);
        assert_eq!(config.teams[3].profile, "GRAPHISTE");
        assert_eq!(config.layout.first_slot_col, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tace.json");

        let mut config = AggregatorConfig::default();
        config.teams.truncate(2);
        config.save(&path).unwrap();

        let loaded = AggregatorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tace.json");
        fs::write(&path, r#"{"in_scope_category": "CDI", "layout": {"first_slot_col": 6}}"#).unwrap();

        let config = AggregatorConfig::load(&path).unwrap();
        assert_eq!(config.in_scope_category, "CDI");
        assert_eq!(config.layout.first_slot_col, 6);
        assert_eq!(config.layout.date_header_row, 2);
        assert_eq!(config.teams.len(), 4);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tace.json");
        fs::write(&path, r#"{"layout": {"header_rows": 2, "date_header_row": 2}}"#).unwrap();

        assert!(matches!(
            AggregatorConfig::load(&path),
            Err(TaceError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AggregatorConfig::load("/nonexistent/tace.json"),
            Err(TaceError::Io { .. })
        ));
    }
}

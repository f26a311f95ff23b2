//! Half-day status classification.
//!
//! Rules are evaluated in order and the first keyword contained in the cell
//! wins. Matching is case-sensitive substring containment.

use serde::{Deserialize, Serialize};

/// Reserved status of a half-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Absence,
    Interne,
    NonAffected,
    Prevision,
}

/// Result of classifying one status cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedCell {
    Status(StatusKind),
    /// Free text naming a project.
    Project(String),
    Empty,
}

impl ClassifiedCell {
    pub fn status(&self) -> Option<StatusKind> {
        match self {
            ClassifiedCell::Status(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// One (keyword, kind) classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRule {
    pub keyword: String,
    pub kind: StatusKind,
}

impl StatusRule {
    pub fn new(keyword: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            keyword: keyword.into(),
            kind,
        }
    }
}

/// Ordered status rules plus the tokens that never name a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusRules {
    pub rules: Vec<StatusRule>,
    /// Compared case-insensitively against each word of a non-status cell.
    pub ignore_tokens: Vec<String>,
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            rules: vec![
                StatusRule::new("Absence", StatusKind::Absence),
                StatusRule::new("Interne", StatusKind::Interne),
                StatusRule::new("Non-Aff", StatusKind::NonAffected),
                StatusRule::new("Prévision", StatusKind::Prevision),
            ],
            ignore_tokens: vec!["OUT".into(), "congé".into(), "conge".into()],
        }
    }
}

impl StatusRules {
    /// First rule whose keyword occurs in `text`.
    pub fn status_of(&self, text: &str) -> Option<StatusKind> {
        self.rules
            .iter()
            .find(|rule| !rule.keyword.is_empty() && text.contains(rule.keyword.as_str()))
            .map(|rule| rule.kind)
    }

    /// Classify a status cell.
    pub fn classify(&self, text: &str) -> ClassifiedCell {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ClassifiedCell::Empty;
        }
        if let Some(kind) = self.status_of(trimmed) {
            return ClassifiedCell::Status(kind);
        }
        if self.is_ignored(trimmed) {
            return ClassifiedCell::Empty;
        }
        ClassifiedCell::Project(trimmed.to_string())
    }

    fn is_ignored(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| {
                self.ignore_tokens
                    .iter()
                    .any(|token| token.to_lowercase() == word)
            })
    }
}

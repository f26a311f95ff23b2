//! Grid loading from CSV/TSV exports and sheet-values JSON.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Cell, RawGrid};
use crate::error::{Result, TaceError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// On-disk encoding of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridFormat {
    Json,
    Tsv,
    Csv,
    CsvSemicolon,
    Psv,
}

impl GridFormat {
    fn from_delimiter(delimiter: u8) -> Self {
        match delimiter {
            b'\t' => GridFormat::Tsv,
            b';' => GridFormat::CsvSemicolon,
            b'|' => GridFormat::Psv,
            _ => GridFormat::Csv,
        }
    }
}

/// Metadata about a loaded grid file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSource {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file bytes.
    pub hash: String,
    pub size_bytes: u64,
    pub format: GridFormat,
    pub row_count: usize,
    pub column_count: usize,
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct GridParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Convert numeric-looking text into `Cell::Number`.
    pub numeric_cells: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for GridParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            numeric_cells: true,
            quote: b'"',
        }
    }
}

/// Reads raw grids. Header rows are kept as data: the sheet layout decides
/// what they mean.
pub struct GridParser {
    config: GridParserConfig,
}

impl GridParser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: GridParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: GridParserConfig) -> Self {
        Self { config }
    }

    /// Load a grid from a file. `.json` files are read as sheet values,
    /// anything else as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RawGrid, GridSource)> {
        let path = path.as_ref();
        let io_err = |e| TaceError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let (grid, format) = if is_json {
            (self.parse_json(&contents)?, GridFormat::Json)
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            };
            (
                self.parse_delimited(&contents, delimiter)?,
                GridFormat::from_delimiter(delimiter),
            )
        };

        debug!(
            path = %path.display(),
            rows = grid.row_count(),
            columns = grid.column_count(),
            ?format,
            "loaded grid"
        );

        let source = GridSource {
            file: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash,
            size_bytes: contents.len() as u64,
            format,
            row_count: grid.row_count(),
            column_count: grid.column_count(),
        };

        Ok((grid, source))
    }

    /// Parse delimited text, auto-detecting the delimiter unless configured.
    pub fn parse_text(&self, bytes: &[u8]) -> Result<RawGrid> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_delimited(bytes, delimiter)
    }

    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<RawGrid> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| self.text_cell(s)).collect());
        }

        if rows.is_empty() {
            return Err(TaceError::EmptyData("No rows found".to_string()));
        }

        Ok(RawGrid::new(rows))
    }

    /// Parse `{"values": [[...]]}` or a bare `[[...]]`.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<RawGrid> {
        let value: Value = serde_json::from_slice(bytes)?;
        let rows = match value {
            Value::Object(mut map) => map.remove("values").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };

        let Value::Array(rows) = rows else {
            return Err(TaceError::EmptyData(
                "Expected an array of rows".to_string(),
            ));
        };

        let grid: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| match row {
                Value::Array(cells) => cells.into_iter().map(|c| self.json_cell(c)).collect(),
                _ => Vec::new(),
            })
            .collect();

        if grid.is_empty() {
            return Err(TaceError::EmptyData("No rows found".to_string()));
        }

        Ok(RawGrid::new(grid))
    }

    fn text_cell(&self, raw: &str) -> Cell {
        if raw.trim().is_empty() {
            return Cell::Empty;
        }
        if self.config.numeric_cells {
            if let Some(n) = parse_number(raw) {
                return Cell::Number(n);
            }
        }
        Cell::Text(raw.to_string())
    }

    fn json_cell(&self, value: Value) -> Cell {
        match value {
            Value::Null => Cell::Empty,
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => self.text_cell(&s),
            Value::Bool(b) => Cell::Text(b.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl Default for GridParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain decimal numbers only; "inf", "NaN" and friends stay text.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let starts_numeric = trimmed
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || c == '-' || c == '.')
        .unwrap_or(false);
    if !starts_numeric {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TaceError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Sheet exports pad every row to the same width, so consistency wins.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

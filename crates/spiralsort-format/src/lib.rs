//! spiralsort-format: Pure point-cloud parsers and serializers (sans-IO)
//!
//! Reads and writes node tables as CSV or JSON, and renders an ordered
//! cloud as an SVG preview. Every function takes and returns strings;
//! file handling belongs to the caller.

pub mod csv;
pub mod json;
pub mod svg;

use std::path::Path;

use spiralsort::Node;

pub use svg::{SvgMetadata, to_svg};

/// Errors from parsing or serializing a node table.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A required column is absent from the input.
    #[error("missing column: {0}")]
    MissingColumn(&'static str),

    /// A malformed CSV row. `line` is 1-based.
    #[error("CSV line {line}: {message}")]
    Csv { line: usize, message: String },

    /// A row of a column-oriented JSON table is absent from `column`.
    #[error("column {column} has no value for row {row:?}")]
    MissingValue { column: &'static str, row: String },

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("unsupported format: {0:?} (expected csv or json)")]
    UnsupportedFormat(String),
}

/// Supported node-table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Select a format from a file extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedFormat`] for anything other than
    /// `csv` or `json`.
    pub fn from_extension(extension: &str) -> Result<Self, FormatError> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(FormatError::UnsupportedFormat(extension.to_string())),
        }
    }

    /// Select a format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedFormat`] if `path` has no
    /// supported extension.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| FormatError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(extension)
    }

    /// The canonical file extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Parse a node table in this format.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] describing the first malformed input.
    pub fn parse(self, input: &str) -> Result<Vec<Node>, FormatError> {
        match self {
            Self::Csv => csv::parse_csv(input),
            Self::Json => json::parse_json(input),
        }
    }

    /// Serialize nodes in this format.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Json`] if JSON serialization fails.
    pub fn serialize(self, nodes: &[Node]) -> Result<String, FormatError> {
        match self {
            Self::Csv => Ok(csv::to_csv(nodes)),
            Self::Json => json::to_json(nodes),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

//! # onepager-core
//!
//! Core domain model and synthesis engine for onepager status reports.
//!
//! This crate provides:
//! - Domain types: `Dataset`, `Row`, `Cell`, `ColumnMapping`, `Item`, `Report`
//! - The report pipeline: column resolution, row normalization, metrics,
//!   meeting highlights and tone-adapted narrative
//! - The `ReportRenderer` trait implemented by export sinks
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use onepager_core::{generate_report, Cell, CellValue, Column, Dataset, ReportRequest, Row, Tone};
//!
//! let mut dataset = Dataset::new("Q3 Objectives");
//! dataset.columns = vec![Column::new(1, "Task Name"), Column::new(2, "Status")];
//! dataset.rows.push(
//!     Row::new(10)
//!         .cell(Cell::new(1, CellValue::text("Launch beta")))
//!         .cell(Cell::new(2, CellValue::text("Green"))),
//! );
//!
//! let request = ReportRequest::new().status_column("Status").tone(Tone::Team);
//! let report = generate_report(Some(&dataset), &request).unwrap();
//!
//! assert_eq!(report.metrics().green.value, 1);
//! assert!(report.narrative().starts_with("Team sync recap: 1/1 initiatives on track"));
//! ```

pub mod columns;
pub mod highlights;
pub mod metrics;
pub mod narrative;
pub mod normalize;
pub mod report;

pub use columns::{ColumnIndex, ColumnMapping, Field, DEFAULT_NAME_COLUMN};
pub use highlights::extract_highlights;
pub use metrics::{aggregate, Metric, Metrics};
pub use narrative::{compose, Tone, ToneConfig};
pub use normalize::{normalize, Normalized, StatusCounts};
pub use report::{generate_report, generate_report_at, Report, ReportRequest};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Identifier of a dataset column
pub type ColumnId = u64;

/// Identifier of a dataset row
pub type RowId = u64;

// ============================================================================
// Dataset
// ============================================================================

/// A tabular status sheet as exported by the dataset provider.
///
/// Keys follow the camelCase sheet-export shape
/// (`columns`, `rows`, `parentId`, `columnId`, `displayValue`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Sheet name
    #[serde(default)]
    pub name: String,
    /// Row count reported by the provider (may include child rows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_row_count: Option<usize>,
    /// Column definitions, in sheet order
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Rows, in sheet order
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Rows without a parent reference
    pub fn top_level_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_top_level())
    }

    /// Number of rows, preferring the provider's own count
    pub fn row_count(&self) -> usize {
        self.total_row_count.unwrap_or(self.rows.len())
    }

    /// One-line load confirmation, e.g. `Loaded "Roadmap" with 12 rows.`
    pub fn summary(&self) -> String {
        format!("Loaded \"{}\" with {} rows.", self.name, self.row_count())
    }
}

/// A column definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(default)]
    pub title: String,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A sheet row. Rows with a `parent_id` are children in the sheet hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub id: RowId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RowId>,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Mark this row as a child of `parent`
    pub fn child_of(mut self, parent: RowId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Append a cell
    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Find the cell belonging to a column
    pub fn cell_for(&self, column_id: ColumnId) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.column_id == column_id)
    }
}

/// A single cell value with its optional formatted representation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl Cell {
    pub fn new(column_id: ColumnId, value: CellValue) -> Self {
        Self {
            column_id,
            value: Some(value),
            display_value: None,
        }
    }

    /// A cell with neither raw nor display value
    pub fn empty(column_id: ColumnId) -> Self {
        Self {
            column_id,
            value: None,
            display_value: None,
        }
    }

    /// Set the formatted representation
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display_value = Some(display.into());
        self
    }

    /// Display value if present, else the raw value as text, else empty
    pub fn text(&self) -> String {
        match (&self.display_value, &self.value) {
            (Some(display), _) => display.clone(),
            (None, Some(value)) => value.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Raw cell content. Sheets carry text, numbers or checkbox booleans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Bool(flag) => write!(f, "{}", flag),
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// Traffic-light classification of a free-text status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Green,
    Yellow,
    Red,
    #[default]
    Other,
}

impl StatusTone {
    /// Classify raw status text.
    ///
    /// Rules are checked in priority order and the first match wins:
    /// empty → Other; "green" / exactly "on track" / exactly "complete" → Green;
    /// "yellow" / "amber" / "watch" → Yellow; "red" / "critical" / "behind" → Red;
    /// anything else → Other. Matching is case-insensitive.
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.is_empty() {
            return StatusTone::Other;
        }
        if status.contains("green") || status == "on track" || status == "complete" {
            return StatusTone::Green;
        }
        if ["yellow", "amber", "watch"].iter().any(|k| status.contains(k)) {
            return StatusTone::Yellow;
        }
        if ["red", "critical", "behind"].iter().any(|k| status.contains(k)) {
            return StatusTone::Red;
        }
        StatusTone::Other
    }

    /// Lowercase key, as used in serialized reports
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTone::Green => "green",
            StatusTone::Yellow => "yellow",
            StatusTone::Red => "red",
            StatusTone::Other => "other",
        }
    }

    /// Badge label shown next to an item
    pub fn label(&self) -> &'static str {
        match self {
            StatusTone::Green => "Green",
            StatusTone::Yellow => "Yellow",
            StatusTone::Red => "Red",
            StatusTone::Other => "—",
        }
    }
}

impl std::fmt::Display for StatusTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized top-level row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Never empty; `"Untitled"` when nothing else resolves
    pub name: String,
    pub status: StatusTone,
    pub delta: String,
    pub blocker: String,
    pub owner: String,
}

/// A blocker reported on an item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockerEntry {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A week-over-week movement reported on an item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEntry {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

// ============================================================================
// Traits
// ============================================================================

/// Export sink for an assembled report
pub trait ReportRenderer {
    type Output;

    /// Render the report to the sink's output format
    fn render(&self, report: &Report) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Report generation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Load a sheet before generating the report.")]
    MissingDataset,
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    /// The report could not be encoded in the sink's format
    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

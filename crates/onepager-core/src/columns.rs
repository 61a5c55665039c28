//! Column resolution
//!
//! Maps logical report fields to sheet columns by title. Lookup is a
//! case-insensitive exact match and never fails: an unset mapping, an
//! unknown title or a missing cell all resolve to the empty string.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Column, Row};

/// Column consulted for item names when the key-result mapping yields nothing
pub const DEFAULT_NAME_COLUMN: &str = "Task Name";

/// Logical fields a report reads from each row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    KeyResult,
    Status,
    Delta,
    Blockers,
    Owner,
}

/// User-chosen column titles for each logical field.
///
/// Titles are trimmed on lookup; an empty title counts as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub key_result: Option<String>,
    pub status: Option<String>,
    pub delta: Option<String>,
    pub blockers: Option<String>,
    pub owner: Option<String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_result(mut self, title: impl Into<String>) -> Self {
        self.key_result = Some(title.into());
        self
    }

    pub fn status(mut self, title: impl Into<String>) -> Self {
        self.status = Some(title.into());
        self
    }

    pub fn delta(mut self, title: impl Into<String>) -> Self {
        self.delta = Some(title.into());
        self
    }

    pub fn blockers(mut self, title: impl Into<String>) -> Self {
        self.blockers = Some(title.into());
        self
    }

    pub fn owner(mut self, title: impl Into<String>) -> Self {
        self.owner = Some(title.into());
        self
    }

    /// Mapped title for a field, if set and non-blank
    pub fn get(&self, field: Field) -> Option<&str> {
        let title = match field {
            Field::KeyResult => &self.key_result,
            Field::Status => &self.status,
            Field::Delta => &self.delta,
            Field::Blockers => &self.blockers,
            Field::Owner => &self.owner,
        };
        title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(mut self, other: ColumnMapping) -> Self {
        fn pick(base: &mut Option<String>, over: Option<String>) {
            if over.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                *base = over;
            }
        }
        pick(&mut self.key_result, other.key_result);
        pick(&mut self.status, other.status);
        pick(&mut self.delta, other.delta);
        pick(&mut self.blockers, other.blockers);
        pick(&mut self.owner, other.owner);
        self
    }
}

/// Columns of one dataset indexed by lowercase title
#[derive(Clone, Debug)]
pub struct ColumnIndex<'a> {
    by_title: HashMap<String, &'a Column>,
}

impl<'a> ColumnIndex<'a> {
    /// Build the index. When titles collide the later column wins.
    pub fn new(columns: &'a [Column]) -> Self {
        let by_title = columns
            .iter()
            .map(|column| (column.title.to_lowercase(), column))
            .collect();
        Self { by_title }
    }

    /// Look up a column by title, ignoring case
    pub fn get(&self, title: &str) -> Option<&'a Column> {
        self.by_title.get(&title.to_lowercase()).copied()
    }

    /// Text of the cell under `title` in `row`, or empty
    pub fn resolve_cell(&self, row: &Row, title: Option<&str>) -> String {
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            return String::new();
        };
        self.get(title)
            .and_then(|column| row.cell_for(column.id))
            .map(|cell| cell.text())
            .unwrap_or_default()
    }

    /// Text of the cell mapped to `field` in `row`, or empty
    pub fn resolve_field(&self, row: &Row, mapping: &ColumnMapping, field: Field) -> String {
        self.resolve_cell(row, mapping.get(field))
    }
}

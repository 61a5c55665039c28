//! Row normalization
//!
//! Flattens the top-level rows of a dataset into `Item`s, classifying each
//! status and collecting blocker and delta entries in row order. Child rows
//! are skipped so the summary stays one level deep.

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnIndex, ColumnMapping, Field, DEFAULT_NAME_COLUMN};
use crate::{BlockerEntry, Dataset, DeltaEntry, Item, Row, StatusTone};

/// Name given to rows where nothing else resolves
pub const UNTITLED: &str = "Untitled";

/// Number of items per status tone
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    pub other: usize,
}

impl StatusCounts {
    pub fn record(&mut self, tone: StatusTone) {
        match tone {
            StatusTone::Green => self.green += 1,
            StatusTone::Yellow => self.yellow += 1,
            StatusTone::Red => self.red += 1,
            StatusTone::Other => self.other += 1,
        }
    }

    pub fn get(&self, tone: StatusTone) -> usize {
        match tone {
            StatusTone::Green => self.green,
            StatusTone::Yellow => self.yellow,
            StatusTone::Red => self.red,
            StatusTone::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red + self.other
    }
}

/// Output of `normalize`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    pub items: Vec<Item>,
    pub blockers: Vec<BlockerEntry>,
    pub deltas: Vec<DeltaEntry>,
    pub counts: StatusCounts,
}

/// Normalize the top-level rows of `dataset` using `mapping`
pub fn normalize(dataset: &Dataset, mapping: &ColumnMapping) -> Normalized {
    let index = ColumnIndex::new(&dataset.columns);
    let mut out = Normalized::default();
    let mut skipped = 0usize;

    for row in &dataset.rows {
        if !row.is_top_level() {
            skipped += 1;
            continue;
        }

        let item = normalize_row(&index, row, mapping);
        tracing::trace!(row = row.id, name = %item.name, status = %item.status, "normalized row");

        if !item.blocker.is_empty() {
            out.blockers.push(BlockerEntry {
                name: item.name.clone(),
                text: item.blocker.clone(),
                owner: non_empty(&item.owner),
            });
        }
        if !item.delta.is_empty() {
            out.deltas.push(DeltaEntry {
                name: item.name.clone(),
                text: item.delta.clone(),
                owner: non_empty(&item.owner),
            });
        }

        out.counts.record(item.status);
        out.items.push(item);
    }

    if skipped > 0 {
        tracing::debug!(skipped, sheet = %dataset.name, "skipped child rows");
    }

    out
}

fn normalize_row(index: &ColumnIndex<'_>, row: &Row, mapping: &ColumnMapping) -> Item {
    let status = index.resolve_field(row, mapping, Field::Status);

    Item {
        name: resolve_name(index, row, mapping),
        status: StatusTone::classify(&status),
        delta: index.resolve_field(row, mapping, Field::Delta),
        blocker: index.resolve_field(row, mapping, Field::Blockers),
        owner: index.resolve_field(row, mapping, Field::Owner),
    }
}

/// Mapped key-result column, then the `Task Name` column, then the first
/// cell's display value, then `Untitled`
fn resolve_name(index: &ColumnIndex<'_>, row: &Row, mapping: &ColumnMapping) -> String {
    let mapped = index.resolve_field(row, mapping, Field::KeyResult);
    if !mapped.is_empty() {
        return mapped;
    }

    let fallback = index.resolve_cell(row, Some(DEFAULT_NAME_COLUMN));
    if !fallback.is_empty() {
        return fallback;
    }

    row.cells
        .first()
        .and_then(|cell| cell.display_value.clone())
        .filter(|display| !display.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

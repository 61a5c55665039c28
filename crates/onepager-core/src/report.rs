//! Report assembly
//!
//! Runs the full pipeline over one dataset and one set of notes and returns
//! a freshly built `Report`. A report is never edited after assembly; a new
//! request produces a new report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::columns::ColumnMapping;
use crate::highlights::extract_highlights;
use crate::metrics::{aggregate, Metrics};
use crate::narrative::{compose, Tone};
use crate::normalize::normalize;
use crate::{BlockerEntry, Dataset, DeltaEntry, Item, ReportError};

/// Options for a single report generation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub mapping: ColumnMapping,
    pub tone: Tone,
    /// Opening used by `Tone::Custom`
    pub custom_tone: String,
    pub emphasis: String,
    /// Free-form meeting notes
    pub notes: String,
}

impl ReportRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn key_result_column(mut self, title: impl Into<String>) -> Self {
        self.mapping.key_result = Some(title.into());
        self
    }

    pub fn status_column(mut self, title: impl Into<String>) -> Self {
        self.mapping.status = Some(title.into());
        self
    }

    pub fn delta_column(mut self, title: impl Into<String>) -> Self {
        self.mapping.delta = Some(title.into());
        self
    }

    pub fn blockers_column(mut self, title: impl Into<String>) -> Self {
        self.mapping.blockers = Some(title.into());
        self
    }

    pub fn owner_column(mut self, title: impl Into<String>) -> Self {
        self.mapping.owner = Some(title.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn custom_tone(mut self, text: impl Into<String>) -> Self {
        self.custom_tone = text.into();
        self
    }

    pub fn emphasis(mut self, text: impl Into<String>) -> Self {
        self.emphasis = text.into();
        self
    }

    pub fn notes(mut self, text: impl Into<String>) -> Self {
        self.notes = text.into();
        self
    }
}

/// An assembled status report
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    generated_at: DateTime<Utc>,
    sheet_name: String,
    tone: String,
    emphasis: String,
    notes: String,
    items: Vec<Item>,
    metrics: Metrics,
    blockers: Vec<BlockerEntry>,
    deltas: Vec<DeltaEntry>,
    meeting_highlights: Vec<String>,
    narrative: String,
}

impl Report {
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Tone label: the tone key, or the custom override text
    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn emphasis(&self) -> &str {
        &self.emphasis
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Items in sheet row order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Blockers in sheet row order
    pub fn blockers(&self) -> &[BlockerEntry] {
        &self.blockers
    }

    /// Deltas in sheet row order
    pub fn deltas(&self) -> &[DeltaEntry] {
        &self.deltas
    }

    pub fn meeting_highlights(&self) -> &[String] {
        &self.meeting_highlights
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }
}

/// Generate a report stamped with the current time.
///
/// Fails only when no dataset has been loaded.
pub fn generate_report(
    dataset: Option<&Dataset>,
    request: &ReportRequest,
) -> Result<Report, ReportError> {
    generate_report_at(dataset, request, Utc::now())
}

/// Generate a report stamped with `generated_at`
pub fn generate_report_at(
    dataset: Option<&Dataset>,
    request: &ReportRequest,
    generated_at: DateTime<Utc>,
) -> Result<Report, ReportError> {
    let dataset = dataset.ok_or(ReportError::MissingDataset)?;

    let notes = request.notes.trim();
    let emphasis = request.emphasis.trim();
    let custom_tone = request.custom_tone.trim();

    let parsed = normalize(dataset, &request.mapping);
    let metrics = aggregate(&parsed.counts, parsed.items.len());
    let narrative = compose(
        &metrics,
        &parsed.blockers,
        &parsed.deltas,
        request.tone,
        custom_tone,
        emphasis,
    );

    tracing::debug!(
        sheet = %dataset.name,
        items = parsed.items.len(),
        blockers = parsed.blockers.len(),
        deltas = parsed.deltas.len(),
        tone = %request.tone,
        "assembled report"
    );

    Ok(Report {
        generated_at,
        sheet_name: dataset.name.clone(),
        tone: request.tone.label(custom_tone),
        emphasis: emphasis.to_string(),
        notes: notes.to_string(),
        items: parsed.items,
        metrics,
        blockers: parsed.blockers,
        deltas: parsed.deltas,
        meeting_highlights: extract_highlights(notes),
        narrative,
    })
}

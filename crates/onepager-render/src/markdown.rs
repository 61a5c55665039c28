//! Markdown report renderer
//!
//! Mirrors the on-screen report layout: metric cards, a traffic-light
//! table, blockers, deltas, the narrative and meeting highlights.
//!
//! ## Example Output
//!
//! ```text
//! # One Page Report
//!
//! _Source sheet: Roadmap · Generated: 2026-05-04 08:15 UTC · Tone: executive_
//!
//! ## Overall health
//!
//! | Green | Yellow | Red |
//! |---|---|---|
//! | **2** | **0** | **1** |
//! | 50% on track | 0% watch list | 25% critical |
//!
//! ## Traffic lights
//!
//! | Initiative | Status | Delta vs last week | Owner |
//! |---|---|---|---|
//! | Partner API | ● Green | — | — |
//! ```

use onepager_core::{RenderError, Report, ReportRenderer, StatusTone};

use crate::{escape_cell, or_dash, EMPTY_FIELD, REPORT_TITLE, TIMESTAMP_FORMAT};

/// Markdown report renderer
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    /// Traffic-light rows shown
    pub max_items: usize,
    /// Blockers shown
    pub max_blockers: usize,
    /// Deltas shown
    pub max_deltas: usize,
    /// Whether to include the header line with sheet, timestamp and tone
    pub show_header: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            max_items: 12,
            max_blockers: 6,
            max_deltas: 6,
            show_header: true,
        }
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit the sheet/timestamp line (stable output for diffs)
    pub fn no_header(mut self) -> Self {
        self.show_header = false;
        self
    }

    fn badge(status: StatusTone) -> String {
        match status {
            StatusTone::Other => EMPTY_FIELD.to_string(),
            tone => format!("● {}", tone.label()),
        }
    }

    fn section(output: &mut String, title: &str) {
        output.push_str(&format!("## {}\n\n", title));
    }
}

impl ReportRenderer for MarkdownRenderer {
    type Output = String;

    fn render(&self, report: &Report) -> Result<String, RenderError> {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", REPORT_TITLE));
        if self.show_header {
            output.push_str(&format!(
                "_Source sheet: {} · Generated: {} · Tone: {}_\n\n",
                report.sheet_name(),
                report.generated_at().format(TIMESTAMP_FORMAT),
                report.tone()
            ));
        }

        // Metric cards
        Self::section(&mut output, "Overall health");
        let metrics: Vec<_> = report.metrics().iter().collect();
        let labels: Vec<String> = metrics.iter().map(|m| m.label.clone()).collect();
        let values: Vec<String> = metrics.iter().map(|m| format!("**{}**", m.value)).collect();
        let descriptors: Vec<String> = metrics.iter().map(|m| m.descriptor.clone()).collect();
        output.push_str(&format!("| {} |\n", labels.join(" | ")));
        output.push_str(&format!("|{}\n", "---|".repeat(labels.len())));
        output.push_str(&format!("| {} |\n", values.join(" | ")));
        output.push_str(&format!("| {} |\n\n", descriptors.join(" | ")));

        // Traffic lights
        Self::section(&mut output, "Traffic lights");
        output.push_str("| Initiative | Status | Delta vs last week | Owner |\n");
        output.push_str("|---|---|---|---|\n");
        for item in report.items().iter().take(self.max_items) {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&item.name),
                Self::badge(item.status),
                escape_cell(or_dash(&item.delta)),
                escape_cell(or_dash(&item.owner))
            ));
        }
        output.push('\n');

        // Blockers
        Self::section(&mut output, "Blockers");
        if report.blockers().is_empty() {
            output.push_str("No blockers reported.\n");
        }
        for blocker in report.blockers().iter().take(self.max_blockers) {
            let owner = blocker
                .owner
                .as_ref()
                .map(|owner| format!(" — Owner: {}", owner))
                .unwrap_or_default();
            output.push_str(&format!("- **{}**: {}{}\n", blocker.name, blocker.text, owner));
        }
        output.push('\n');

        // Deltas
        Self::section(&mut output, "Delta vs last week");
        if report.deltas().is_empty() {
            output.push_str("No notable movement captured.\n");
        }
        for delta in report.deltas().iter().take(self.max_deltas) {
            output.push_str(&format!("- **{}**: {}\n", delta.name, delta.text));
        }
        output.push('\n');

        Self::section(&mut output, "Narrative");
        output.push_str(&format!("{}\n\n", report.narrative()));

        Self::section(&mut output, "Meeting highlights");
        if report.meeting_highlights().is_empty() {
            output.push_str("Add meeting notes to surface highlights.\n");
        }
        for highlight in report.meeting_highlights() {
            output.push_str(&format!("- {}\n", highlight));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_per_tone() {
        assert_eq!(MarkdownRenderer::badge(StatusTone::Green), "● Green");
        assert_eq!(MarkdownRenderer::badge(StatusTone::Red), "● Red");
        assert_eq!(MarkdownRenderer::badge(StatusTone::Other), "—");
    }
}

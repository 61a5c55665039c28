//! # onepager-render
//!
//! Export sinks for onepager reports.
//!
//! This crate provides:
//! - Plain-text one-page report (`TextRenderer`)
//! - Markdown report with metric cards and a traffic-light table (`MarkdownRenderer`)
//! - Slide outline with a condensed item table (`SlideOutlineRenderer`)
//! - Pretty-printed JSON of the whole report (`JsonRenderer`)
//!
//! Each sink applies its own truncation limits. The report keeps items,
//! blockers and deltas in sheet row order, so truncation is deterministic.
//!
//! ## Example
//!
//! ```rust,ignore
//! use onepager_core::{generate_report, ReportRenderer, ReportRequest};
//! use onepager_render::{MarkdownRenderer, TextRenderer};
//!
//! let report = generate_report(Some(&dataset), &ReportRequest::new())?;
//!
//! let text = TextRenderer::new().wrap_width(80).render(&report)?;
//! let markdown = MarkdownRenderer::new().render(&report)?;
//! std::fs::write("one-page-report.md", markdown)?;
//! ```

pub mod json;
pub mod markdown;
pub mod slides;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use slides::SlideOutlineRenderer;

use onepager_core::{RenderError, Report, ReportRenderer};

/// Title used by every sink
pub const REPORT_TITLE: &str = "One Page Report";

/// Placeholder for empty optional fields
pub const EMPTY_FIELD: &str = "—";

/// Timestamp format used in report headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Plain-text one-page report renderer
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Traffic-light rows shown
    pub max_items: usize,
    /// Blockers shown
    pub max_blockers: usize,
    /// Wrap long lines at this many characters
    pub wrap_width: Option<usize>,
    /// Indent for list entries
    pub indent: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            max_items: 12,
            max_blockers: 6,
            wrap_width: None,
            indent: 2,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the number of traffic-light rows
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }

    /// Configure the number of blockers
    pub fn max_blockers(mut self, max: usize) -> Self {
        self.max_blockers = max;
        self
    }

    /// Wrap lines at `width` characters
    pub fn wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = Some(width);
        self
    }

    fn push_block(&self, output: &mut String, text: &str, indent: usize) {
        let pad = " ".repeat(indent);
        let lines = match self.wrap_width {
            Some(width) => wrap_text(text, width.saturating_sub(indent)),
            None => vec![text.to_string()],
        };
        for line in lines {
            output.push_str(&format!("{}{}\n", pad, line));
        }
    }
}

impl ReportRenderer for TextRenderer {
    type Output = String;

    fn render(&self, report: &Report) -> Result<String, RenderError> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", REPORT_TITLE));
        output.push_str(&format!("Source sheet: {}\n", report.sheet_name()));
        output.push_str(&format!(
            "Generated: {}\n\n",
            report.generated_at().format(TIMESTAMP_FORMAT)
        ));

        output.push_str("Narrative\n");
        self.push_block(&mut output, report.narrative(), 0);
        output.push('\n');

        output.push_str("Traffic lights\n");
        for item in report.items().iter().take(self.max_items) {
            let line = format!(
                "{} — {} | Δ {} | Owner {}",
                item.name,
                item.status.as_str().to_uppercase(),
                or_dash(&item.delta),
                or_dash(&item.owner)
            );
            self.push_block(&mut output, &line, self.indent);
        }
        output.push('\n');

        output.push_str("Blockers\n");
        if report.blockers().is_empty() {
            self.push_block(&mut output, "None reported.", self.indent);
        }
        for blocker in report.blockers().iter().take(self.max_blockers) {
            let owner = blocker
                .owner
                .as_ref()
                .map(|owner| format!(" (Owner {})", owner))
                .unwrap_or_default();
            let line = format!("{}: {}{}", blocker.name, blocker.text, owner);
            self.push_block(&mut output, &line, self.indent);
        }
        output.push('\n');

        output.push_str("Meeting highlights\n");
        if report.meeting_highlights().is_empty() {
            self.push_block(&mut output, "Add meeting notes to include highlights.", self.indent);
        }
        for highlight in report.meeting_highlights() {
            self.push_block(&mut output, &format!("• {}", highlight), self.indent);
        }

        Ok(output)
    }
}

/// Substitute the placeholder dash for empty text
pub fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_FIELD
    } else {
        text
    }
}

/// Escape a value for use inside a Markdown table cell
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Shorten `text` to at most `max` characters, ending in `…` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use onepager_core::{generate_report_at, Cell, CellValue, Column, Dataset, ReportRequest, Row};
    use pretty_assertions::assert_eq;

    fn report(rows: usize, notes: &str) -> Report {
        let mut dataset = Dataset::new("Platform");
        dataset.columns = vec![
            Column::new(1, "Task Name"),
            Column::new(2, "Status"),
            Column::new(3, "Blockers"),
            Column::new(4, "Owner"),
        ];
        for i in 0..rows {
            let mut row = Row::new(i as u64)
                .cell(Cell::new(1, CellValue::text(format!("Item {}", i + 1))))
                .cell(Cell::new(2, CellValue::text("green")));
            if i % 2 == 0 {
                row = row
                    .cell(Cell::new(3, CellValue::text("capacity")))
                    .cell(Cell::new(4, CellValue::text("Ana")));
            }
            dataset.rows.push(row);
        }
        let request = ReportRequest::new()
            .status_column("Status")
            .blockers_column("Blockers")
            .owner_column("Owner")
            .notes(notes);
        let at = Utc.with_ymd_and_hms(2026, 5, 4, 8, 15, 0).unwrap();
        generate_report_at(Some(&dataset), &request, at).unwrap()
    }

    #[test]
    fn text_report_layout() {
        let output = TextRenderer::new().render(&report(1, "")).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "One Page Report");
        assert_eq!(lines[1], "Source sheet: Platform");
        assert_eq!(lines[2], "Generated: 2026-05-04 08:15 UTC");
        assert!(output.contains("  Item 1 — GREEN | Δ — | Owner Ana\n"));
        assert!(output.contains("  Item 1: capacity (Owner Ana)\n"));
        assert!(output.contains("  Add meeting notes to include highlights.\n"));
    }

    #[test]
    fn text_report_truncates_lists() {
        let output = TextRenderer::new().render(&report(20, "")).unwrap();
        assert!(output.contains("Item 12 — GREEN"));
        assert!(!output.contains("Item 13 — GREEN"));
        // blockers on odd-numbered items 1, 3, ... 11 are the first six
        assert!(output.contains("Item 11: capacity"));
        assert!(!output.contains("Item 13: capacity"));
    }

    #[test]
    fn text_report_empty_sections() {
        let output = TextRenderer::new().render(&report(0, "- a\n- b\n- c")).unwrap();
        assert!(output.contains("Blockers\n  None reported.\n"));
        assert!(output.contains("Meeting highlights\n  • a\n  • b\n  • c\n"));
    }

    #[test]
    fn text_report_wraps_narrative() {
        let output = TextRenderer::new().wrap_width(40).render(&report(3, "")).unwrap();
        for line in output.lines() {
            assert!(line.chars().count() <= 40, "line too long: {:?}", line);
        }
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("Ünïcödé names", 6), "Ünïcö…");
    }

    #[test]
    fn wrap_text_keeps_words_whole() {
        assert_eq!(wrap_text("aa bb cc dd", 5), vec!["aa bb", "cc dd"]);
        assert_eq!(wrap_text("unbreakable word", 4), vec!["unbreakable", "word"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn table_cells_escape_pipes_and_newlines() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line1\r\nline2"), "line1  line2");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn dash_for_empty_fields() {
        assert_eq!(or_dash(""), "—");
        assert_eq!(or_dash("Kim"), "Kim");
    }
}

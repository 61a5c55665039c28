//! Slide outline renderer
//!
//! Condenses a report onto a single slide: the narrative, a short item
//! table and the top blockers. Cell text is truncated to fit fixed column
//! widths.

use onepager_core::{RenderError, Report, ReportRenderer};

use crate::{escape_cell, or_dash, truncate, REPORT_TITLE};

/// Single-slide outline renderer
#[derive(Clone, Debug)]
pub struct SlideOutlineRenderer {
    /// Table rows shown
    pub max_items: usize,
    /// Blockers shown
    pub max_blockers: usize,
    /// Character limits for the name, delta and owner columns
    pub name_width: usize,
    pub delta_width: usize,
    pub owner_width: usize,
    /// Character limits for blocker lines
    pub blocker_name_width: usize,
    pub blocker_text_width: usize,
}

impl Default for SlideOutlineRenderer {
    fn default() -> Self {
        Self {
            max_items: 10,
            max_blockers: 4,
            name_width: 60,
            delta_width: 40,
            owner_width: 20,
            blocker_name_width: 30,
            blocker_text_width: 40,
        }
    }
}

impl SlideOutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }
}

impl ReportRenderer for SlideOutlineRenderer {
    type Output = String;

    fn render(&self, report: &Report) -> Result<String, RenderError> {
        let mut output = String::new();

        output.push_str(&format!("# {}\n", REPORT_TITLE));
        output.push_str(&format!("Sheet: {}\n\n", report.sheet_name()));
        output.push_str(&format!("> {}\n\n", report.narrative()));

        output.push_str("| Initiative | Status | Delta | Owner |\n");
        output.push_str("|---|---|---|---|\n");
        for item in report.items().iter().take(self.max_items) {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&truncate(&item.name, self.name_width)),
                item.status.as_str().to_uppercase(),
                escape_cell(&truncate(or_dash(&item.delta), self.delta_width)),
                escape_cell(&truncate(or_dash(&item.owner), self.owner_width))
            ));
        }
        output.push('\n');

        output.push_str("## Blockers\n");
        if report.blockers().is_empty() {
            output.push_str("None reported.\n");
        }
        for blocker in report.blockers().iter().take(self.max_blockers) {
            output.push_str(&format!(
                "{}: {}\n",
                truncate(&blocker.name, self.blocker_name_width),
                truncate(&blocker.text, self.blocker_text_width)
            ));
        }

        Ok(output)
    }
}

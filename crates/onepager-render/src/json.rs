//! JSON renderer
//!
//! Serializes the full report with camelCase keys, for piping into other tools.

use onepager_core::{RenderError, Report, ReportRenderer};

/// Pretty-printed JSON renderer
#[derive(Clone, Debug, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for JsonRenderer {
    type Output = String;

    fn render(&self, report: &Report) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(report)
            .map_err(|e| RenderError::Format(format!("Could not serialize report: {}", e)))?;
        json.push('\n');
        Ok(json)
    }
}

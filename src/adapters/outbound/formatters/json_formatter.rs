use crate::application::read_models::{ExplanationReport, GraphView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter serializing the read models as pretty JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_explanation(&self, report: &ExplanationReport) -> Result<String> {
        let mut json = serde_json::to_string_pretty(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }

    fn format_graph(&self, view: &GraphView) -> Result<String> {
        let mut json = serde_json::to_string_pretty(view)
            .map_err(|e| anyhow::anyhow!("Failed to serialize graph to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

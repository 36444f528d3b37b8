use crate::application::read_models::{ExplanationReport, GraphView};
use crate::shared::Result;

/// ReportFormatter port for rendering results
///
/// Implemented once per output format (plain text, JSON).
pub trait ReportFormatter {
    /// Renders the answer to "why is this module here?"
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_explanation(&self, report: &ExplanationReport) -> Result<String>;

    /// Renders a dump of the whole graph or of a single module
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_graph(&self, view: &GraphView) -> Result<String>;
}

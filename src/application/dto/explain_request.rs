use std::path::PathBuf;

/// ExplainRequest - Input of the "why is this module here?" use case
#[derive(Debug, Clone)]
pub struct ExplainRequest {
    /// Directory of the main module (where go.mod lives)
    pub project_path: PathBuf,
    /// Module path to explain
    pub module: String,
    /// Whether to look up the latest published version of each result
    pub show_latest: bool,
    /// Patterns of modules to drop from the graph before analysis
    pub exclude_patterns: Vec<String>,
}

impl ExplainRequest {
    pub fn new(project_path: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            module: module.into(),
            show_latest: false,
            exclude_patterns: Vec::new(),
        }
    }

    pub fn with_show_latest(mut self, show_latest: bool) -> Self {
        self.show_latest = show_latest;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }
}

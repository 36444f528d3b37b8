use std::path::PathBuf;

/// InspectRequest - Input of the graph dump use case
#[derive(Debug, Clone)]
pub struct InspectRequest {
    /// Directory of the main module (where go.mod lives)
    pub project_path: PathBuf,
    /// Restrict the dump to one module; `None` dumps every module
    pub module: Option<String>,
    /// Patterns of modules to drop from the graph before analysis
    pub exclude_patterns: Vec<String>,
}

impl InspectRequest {
    pub fn new(project_path: impl Into<PathBuf>, module: Option<String>) -> Self {
        Self {
            project_path: project_path.into(),
            module,
            exclude_patterns: Vec::new(),
        }
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }
}

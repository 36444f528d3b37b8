use async_trait::async_trait;
use modwhy::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock ModuleGraphSource serving fixed text and recording the project
/// paths it was asked about
#[derive(Clone, Default)]
pub struct MockGraphSource {
    graph: String,
    indirect: String,
    should_fail: bool,
    pub requested_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockGraphSource {
    pub fn new(graph: &str) -> Self {
        Self {
            graph: graph.to_string(),
            ..Default::default()
        }
    }

    pub fn with_indirect(mut self, indirect: &str) -> Self {
        self.indirect = indirect.to_string();
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ModuleGraphSource for MockGraphSource {
    async fn read_module_graph(&self, project_path: &Path) -> Result<String> {
        self.requested_paths
            .lock()
            .unwrap()
            .push(project_path.to_path_buf());
        if self.should_fail {
            return Err(ModWhyError::CommandFailed {
                command: "go mod graph".to_string(),
                details: "go: cannot find main module".to_string(),
            }
            .into());
        }
        Ok(self.graph.clone())
    }

    async fn read_indirect_modules(&self, _project_path: &Path) -> Result<String> {
        Ok(self.indirect.clone())
    }
}

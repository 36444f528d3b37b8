use crate::ports::outbound::ModuleGraphSource;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// FileGraphSource adapter reading saved `go mod graph` output from disk
///
/// Lets the tool run where no go toolchain is installed. Without an
/// indirect listing file no module is treated as `// indirect`, so every
/// module required by the main module counts as direct.
pub struct FileGraphSource {
    graph_file: PathBuf,
    indirect_file: Option<PathBuf>,
}

impl FileGraphSource {
    pub fn new(graph_file: PathBuf, indirect_file: Option<PathBuf>) -> Self {
        Self {
            graph_file,
            indirect_file,
        }
    }
}

#[async_trait]
impl ModuleGraphSource for FileGraphSource {
    async fn read_module_graph(&self, _project_path: &Path) -> Result<String> {
        read_regular_file(&self.graph_file, "module graph file")
    }

    async fn read_indirect_modules(&self, _project_path: &Path) -> Result<String> {
        match &self.indirect_file {
            Some(path) => read_regular_file(path, "indirect module listing"),
            None => Ok(String::new()),
        }
    }
}

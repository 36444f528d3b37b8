use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// ModuleGraphSource port for obtaining the raw module graph
///
/// Abstracts where `go mod graph` style output and the
/// `{{.Indirect}} {{.Path}}` module listing come from: the go toolchain,
/// saved files, or test fixtures.
#[async_trait]
pub trait ModuleGraphSource: Send + Sync {
    /// Returns the edge list, one `parent child` pair per line
    ///
    /// # Errors
    /// Returns an error if the command fails or the file cannot be read
    async fn read_module_graph(&self, project_path: &Path) -> Result<String>;

    /// Returns the module listing, one `<true|false> <module-path>` per line
    ///
    /// # Errors
    /// Returns an error if the command fails or the file cannot be read
    async fn read_indirect_modules(&self, project_path: &Path) -> Result<String>;
}

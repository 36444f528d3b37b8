use crate::ports::outbound::ModuleGraphSource;
use crate::shared::error::ModWhyError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Default go binary, resolved through `PATH`
pub const DEFAULT_GO_BINARY: &str = "go";

const MOD_GRAPH_ARGS: &[&str] = &["mod", "graph"];
const LIST_INDIRECT_ARGS: &[&str] = &["list", "-f", "{{.Indirect}} {{.Path}}", "-m", "all"];

/// GoModuleGraphSource adapter running the go toolchain in the project
/// directory
///
/// Equivalent to running by hand:
/// - `go mod graph`
/// - `go list -f "{{.Indirect}} {{.Path}}" -m all`
pub struct GoModuleGraphSource {
    go_binary: String,
}

impl GoModuleGraphSource {
    pub fn new(go_binary: impl Into<String>) -> Self {
        Self {
            go_binary: go_binary.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        std::iter::once(self.go_binary.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn run(&self, project_path: &Path, args: &[&str]) -> Result<String> {
        let command = self.command_line(args);
        let failed = |details: String| ModWhyError::CommandFailed {
            command: command.clone(),
            details,
        };

        let output = Command::new(&self.go_binary)
            .args(args)
            .current_dir(project_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| failed(format!("failed to spawn '{}': {}", self.go_binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{}: {}", output.status, stderr.trim())).into());
        }

        String::from_utf8(output.stdout)
            .map_err(|e| failed(format!("output is not valid UTF-8: {}", e)).into())
    }
}

impl Default for GoModuleGraphSource {
    fn default() -> Self {
        Self::new(DEFAULT_GO_BINARY)
    }
}

#[async_trait]
impl ModuleGraphSource for GoModuleGraphSource {
    async fn read_module_graph(&self, project_path: &Path) -> Result<String> {
        self.run(project_path, MOD_GRAPH_ARGS).await
    }

    async fn read_indirect_modules(&self, project_path: &Path) -> Result<String> {
        self.run(project_path, LIST_INDIRECT_ARGS).await
    }
}

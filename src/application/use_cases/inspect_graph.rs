use super::load_graph::load_graph;
use crate::application::dto::InspectRequest;
use crate::application::read_models::{GraphView, GraphViewBuilder};
use crate::ports::outbound::{ModuleGraphSource, ProgressReporter};
use crate::shared::Result;

/// InspectGraphUseCase - Dumps the reconstructed module graph
///
/// # Type Parameters
/// * `GS` - ModuleGraphSource implementation
/// * `PR` - ProgressReporter implementation
pub struct InspectGraphUseCase<GS, PR> {
    graph_source: GS,
    progress_reporter: PR,
}

impl<GS, PR> InspectGraphUseCase<GS, PR>
where
    GS: ModuleGraphSource,
    PR: ProgressReporter,
{
    pub fn new(graph_source: GS, progress_reporter: PR) -> Self {
        Self {
            graph_source,
            progress_reporter,
        }
    }

    /// Builds the graph and returns a view of all modules or of the
    /// requested one.
    ///
    /// # Errors
    /// Fails if the graph cannot be read or parsed, or the requested module
    /// is not part of it
    pub async fn execute(&self, request: InspectRequest) -> Result<GraphView> {
        let graph = load_graph(
            &self.graph_source,
            &self.progress_reporter,
            &request.project_path,
            &request.exclude_patterns,
        )
        .await?;

        Ok(GraphViewBuilder::build(&graph, request.module.as_deref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ModWhyError;
    use async_trait::async_trait;
    use std::path::Path;

    struct StaticGraphSource;

    #[async_trait]
    impl ModuleGraphSource for StaticGraphSource {
        async fn read_module_graph(&self, _project_path: &Path) -> Result<String> {
            Ok("root@ a@v1.0.0\na@v1.0.0 b@v2.0.0\n".to_string())
        }

        async fn read_indirect_modules(&self, _project_path: &Path) -> Result<String> {
            Ok(String::new())
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_inspect_whole_graph() {
        let use_case = InspectGraphUseCase::new(StaticGraphSource, SilentReporter);
        let view = use_case.execute(InspectRequest::new(".", None)).await.unwrap();
        assert_eq!(view.packages.len(), 3);
    }

    #[tokio::test]
    async fn test_inspect_single_module() {
        let use_case = InspectGraphUseCase::new(StaticGraphSource, SilentReporter);
        let view = use_case
            .execute(InspectRequest::new(".", Some("b".to_string())))
            .await
            .unwrap();
        assert_eq!(view.packages.len(), 1);
        assert_eq!(view.packages[0].versions[0].parents[0].name, "a");
    }

    #[tokio::test]
    async fn test_inspect_unknown_module() {
        let use_case = InspectGraphUseCase::new(StaticGraphSource, SilentReporter);
        let err = use_case
            .execute(InspectRequest::new(".", Some("zzz".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModWhyError>(),
            Some(ModWhyError::PackageNotFound { .. })
        ));
    }
}

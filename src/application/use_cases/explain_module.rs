use super::load_graph::load_graph;
use crate::application::dto::ExplainRequest;
use crate::application::read_models::{
    Explanation, ExplanationReport, LookupFailureView, RequiredModuleView,
};
use crate::module_graph::domain::Graph;
use crate::module_graph::services::RootCauseResolver;
use crate::ports::outbound::{
    LatestVersionInfo, LatestVersionRepository, ModuleGraphSource, ProgressReporter,
};
use crate::shared::error::ModWhyError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};

/// Upper bound on concurrent module proxy requests
const MAX_CONCURRENT_LOOKUPS: usize = 8;

/// ExplainModuleUseCase - Core use case: why is this module in the build,
/// and what has to be upgraded to move it?
///
/// # Type Parameters
/// * `GS` - ModuleGraphSource implementation
/// * `VREPO` - LatestVersionRepository implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct ExplainModuleUseCase<GS, VREPO, PR> {
    graph_source: GS,
    version_repository: Option<VREPO>,
    progress_reporter: PR,
}

impl<GS, VREPO, PR> ExplainModuleUseCase<GS, VREPO, PR>
where
    GS: ModuleGraphSource,
    VREPO: LatestVersionRepository,
    PR: ProgressReporter,
{
    /// Creates a new ExplainModuleUseCase with injected dependencies
    pub fn new(graph_source: GS, version_repository: Option<VREPO>, progress_reporter: PR) -> Self {
        Self {
            graph_source,
            version_repository,
            progress_reporter,
        }
    }

    /// Executes the use case
    ///
    /// Latest-version lookups only run when `request.show_latest` is set and
    /// a repository was injected. Their failures are collected in
    /// `ExplanationReport::lookup_failures` and never fail the call.
    ///
    /// # Errors
    /// - the graph cannot be read or is malformed
    /// - the module is not part of the graph (`PackageNotFound`)
    /// - the graph is inconsistent (`InconsistentGraph`)
    /// - every parent chain ends in a cycle (`CycleDetected`)
    pub async fn execute(&self, request: ExplainRequest) -> Result<ExplanationReport> {
        let graph = load_graph(
            &self.graph_source,
            &self.progress_reporter,
            &request.project_path,
            &request.exclude_patterns,
        )
        .await?;

        let explanation = self.explain(&graph, &request.module)?;

        let (explanation, lookup_failures) = match explanation {
            Explanation::Indirect {
                module,
                required_by,
                cycles,
            } if request.show_latest => {
                let (required_by, failures) = self.attach_latest_versions(required_by).await;
                (
                    Explanation::Indirect {
                        module,
                        required_by,
                        cycles,
                    },
                    failures,
                )
            }
            other => (other, Vec::new()),
        };

        Ok(ExplanationReport {
            explanation,
            lookup_failures,
        })
    }

    fn explain(&self, graph: &Graph, module: &str) -> Result<Explanation> {
        let package = graph
            .package(module)
            .ok_or_else(|| ModWhyError::PackageNotFound {
                name: module.to_string(),
            })?;

        let resolver = RootCauseResolver::new(graph);

        if resolver.is_direct_dependency(package) {
            return Ok(Explanation::Direct {
                module: package.name().to_string(),
                root: graph.root().unwrap_or_default().to_string(),
            });
        }

        self.progress_reporter
            .report(&format!("🔍 Walking parents of '{}'...", package.name()));

        let path = resolver.find_upgrade_path(package)?;

        for cycle in &path.cycles {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", cycle));
        }

        if path.is_empty() {
            if let Some(cycle) = path.cycles.first() {
                return Err(cycle.clone().into());
            }
        }

        let required_by = path
            .packages
            .iter()
            .map(|name| RequiredModuleView {
                name: name.clone(),
                local_version: graph
                    .package(name)
                    .map(|p| p.last_version().to_string())
                    .unwrap_or_default(),
                latest: None,
            })
            .collect();

        Ok(Explanation::Indirect {
            module: package.name().to_string(),
            required_by,
            cycles: path.cycles.iter().map(|c| c.to_string()).collect(),
        })
    }

    /// Looks up the latest published version of every required module,
    /// preserving order and collecting failures instead of aborting.
    async fn attach_latest_versions(
        &self,
        required_by: Vec<RequiredModuleView>,
    ) -> (Vec<RequiredModuleView>, Vec<LookupFailureView>) {
        let Some(repository) = self.version_repository.as_ref() else {
            return (required_by, Vec::new());
        };

        let total = required_by.len();
        self.progress_reporter
            .report("🌐 Fetching latest versions from the module proxy...");

        let results: Vec<(RequiredModuleView, Result<LatestVersionInfo>)> =
            stream::iter(required_by)
                .map(|view| async move {
                    let result = repository.fetch_latest_version(&view.name).await;
                    (view, result)
                })
                .buffered(MAX_CONCURRENT_LOOKUPS)
                .enumerate()
                .map(|(idx, (view, result))| {
                    self.progress_reporter
                        .report_progress(idx + 1, total, Some(&view.name));
                    (view, result)
                })
                .collect()
                .await;

        let mut enriched = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (mut view, result) in results {
            match result {
                Ok(info) => view.latest = Some(info),
                Err(e) => failures.push(LookupFailureView {
                    module: view.name.clone(),
                    error: ModWhyError::RemoteLookup {
                        module: view.name.clone(),
                        details: format!("{:#}", e),
                    }
                    .to_string(),
                }),
            }
            enriched.push(view);
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Latest version lookup complete: {} succeeded, {} failed",
            total - failures.len(),
            failures.len()
        ));

        (enriched, failures)
    }
}

use crate::module_graph::domain::Graph;
use crate::module_graph::services::{parse_indirect_modules, GraphBuilder, PackageFilter};
use crate::ports::outbound::{ModuleGraphSource, ProgressReporter};
use crate::shared::Result;
use std::path::Path;

/// Reads the module graph and indirect listing from `source` and builds the
/// `Graph`, dropping modules matched by `exclude_patterns`.
pub(super) async fn load_graph<GS, PR>(
    source: &GS,
    progress_reporter: &PR,
    project_path: &Path,
    exclude_patterns: &[String],
) -> Result<Graph>
where
    GS: ModuleGraphSource,
    PR: ProgressReporter,
{
    progress_reporter.report(&format!(
        "📖 Loading module graph from: {}",
        project_path.display()
    ));

    let graph_text = source.read_module_graph(project_path).await?;
    let indirect_listing = source.read_indirect_modules(project_path).await?;

    let filter = PackageFilter::new(exclude_patterns.to_vec())?;
    let indirect = parse_indirect_modules(&indirect_listing);
    let builder = GraphBuilder::new().with_filter(filter);
    let graph = builder.build(&graph_text, indirect)?;

    for pattern in builder.filter().unmatched_patterns() {
        progress_reporter.report_error(&format!(
            "⚠️  Warning: Exclude pattern '{}' did not match any module.",
            pattern
        ));
    }

    progress_reporter.report(&format!(
        "✅ Detected {} module(s), {} edge(s)",
        graph.package_count(),
        graph.edge_count()
    ));

    Ok(graph)
}

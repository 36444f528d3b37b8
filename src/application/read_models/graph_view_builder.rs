//! Builder turning the `Graph` aggregate into a `GraphView`

use super::graph_view::{EdgeView, GraphView, PackageView, VersionView};
use crate::module_graph::domain::{Graph, Package};
use crate::shared::error::ModWhyError;
use std::collections::BTreeMap;

pub struct GraphViewBuilder;

impl GraphViewBuilder {
    /// Builds a view of every package, or only of `module` when given.
    ///
    /// # Errors
    /// `ModWhyError::PackageNotFound` if `module` is not in the graph
    pub fn build(graph: &Graph, module: Option<&str>) -> Result<GraphView, ModWhyError> {
        let packages = match module {
            Some(name) => {
                let package = graph
                    .package(name)
                    .ok_or_else(|| ModWhyError::PackageNotFound {
                        name: name.to_string(),
                    })?;
                vec![Self::build_package(graph, package)]
            }
            None => graph
                .sorted_packages()
                .into_iter()
                .map(|p| Self::build_package(graph, p))
                .collect(),
        };

        Ok(GraphView {
            root: graph.root().map(str::to_string),
            packages,
        })
    }

    fn build_package(graph: &Graph, package: &Package) -> PackageView {
        let is_indirect = graph.is_root_indirect_mod(package.name());

        let versions = package
            .sorted_versions()
            .into_iter()
            .map(|v| VersionView {
                version: v.version().to_string(),
                is_last: v.version() == package.last_version(),
                parents: Self::edges(graph, v.parents(), is_indirect),
                deps: Self::edges(graph, v.deps(), false),
            })
            .collect();

        PackageView {
            name: package.name().to_string(),
            last_version: package.last_version().to_string(),
            versions,
        }
    }

    fn edges(graph: &Graph, map: &BTreeMap<String, String>, child_is_indirect: bool) -> Vec<EdgeView> {
        map.iter()
            .map(|(name, version)| {
                let is_root = graph.is_root(name);
                EdgeView {
                    name: name.clone(),
                    version: version.clone(),
                    is_root,
                    is_indirect: is_root && child_is_indirect,
                }
            })
            .collect()
    }
}

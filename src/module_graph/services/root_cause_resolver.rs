use crate::module_graph::domain::{Graph, Package, PackageItem, PackageVersion};
use crate::shared::error::ModWhyError;
use std::collections::{HashMap, HashSet};

/// Result of walking up from a module to the main module's requirements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradePath {
    /// Modules the main module requires directly, first-seen order, no
    /// duplicates
    pub packages: Vec<String>,
    /// `CycleDetected` errors from abandoned branches
    pub cycles: Vec<ModWhyError>,
}

impl UpgradePath {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// RootCauseResolver service answering "why is this module here?"
///
/// Walks parent edges upward from a module version until it reaches a
/// module that the main module requires directly (and that go.mod does not
/// mark `// indirect`). Those modules are the ones the user can upgrade.
pub struct RootCauseResolver<'g> {
    graph: &'g Graph,
}

impl<'g> RootCauseResolver<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// True iff some version of `package` has the main module as a parent
    /// and go.mod does not list it as `// indirect`.
    pub fn is_direct_dependency(&self, package: &Package) -> bool {
        let Some(root) = self.graph.root() else {
            return false;
        };

        !self.graph.is_root_indirect_mod(package.name())
            && package.versions().values().any(|v| v.has_parent(root))
    }

    /// Collects the direct requirements whose upgrade would eventually pull
    /// in a newer version of `package`.
    ///
    /// Each distinct parent `(name, version)` is ascended once. When a parent
    /// edge closes a cycle only that edge is dropped and its error kept in
    /// `UpgradePath::cycles`; sibling parents at every level still contribute.
    ///
    /// # Errors
    /// `ModWhyError::InconsistentGraph` if an edge points at a node that was
    /// never recorded
    pub fn find_upgrade_path(&self, package: &Package) -> Result<UpgradePath, ModWhyError> {
        let mut processed: HashSet<(String, String)> = HashSet::new();
        let mut memo: HashMap<(String, String), Vec<String>> = HashMap::new();
        let mut found = Vec::new();
        let mut cycles = Vec::new();

        for version in package.sorted_versions() {
            for (parent_name, parent_version) in version.parents() {
                if self.graph.is_root(parent_name) {
                    continue;
                }
                if !processed.insert((parent_name.clone(), parent_version.clone())) {
                    continue;
                }

                let (parent, parent_pv) = self.resolve(parent_name, parent_version)?;

                let mut ascent = Ascent {
                    path: vec![PackageItem {
                        name: package.name().to_string(),
                        version: version.version().to_string(),
                    }],
                    memo: &mut memo,
                    cycles: &mut cycles,
                    cycle_hits: 0,
                };

                let result = self.ascend(parent, parent_pv, &mut ascent);
                found.extend(ascent.follow(result)?);
            }
        }

        Ok(UpgradePath {
            packages: dedupe(found),
            cycles,
        })
    }

    /// Recursive step: stops at the first directly required module on each
    /// chain, otherwise concatenates the results of every non-root parent.
    fn ascend(
        &self,
        package: &Package,
        version: &PackageVersion,
        ascent: &mut Ascent<'_>,
    ) -> Result<Vec<String>, ModWhyError> {
        if self.is_direct_dependency(package) {
            return Ok(vec![package.name().to_string()]);
        }

        let key = (package.name().to_string(), version.version().to_string());
        if let Some(cached) = ascent.memo.get(&key) {
            return Ok(cached.clone());
        }

        ascent.enter(package.name(), version.version())?;
        let hits_before = ascent.cycle_hits;

        let mut found = Vec::new();
        for (parent_name, parent_version) in version.parents() {
            if self.graph.is_root(parent_name) {
                continue;
            }
            let (parent, parent_pv) = self.resolve(parent_name, parent_version)?;
            let result = self.ascend(parent, parent_pv, ascent);
            found.extend(ascent.follow(result)?);
        }

        ascent.leave();
        // a result cut short by a cycle depends on the path taken to get here
        if ascent.cycle_hits == hits_before {
            ascent.memo.insert(key, found.clone());
        }
        Ok(found)
    }

    fn resolve(
        &self,
        name: &str,
        version: &str,
    ) -> Result<(&'g Package, &'g PackageVersion), ModWhyError> {
        self.graph
            .package_version(name, version)
            .ok_or_else(|| ModWhyError::InconsistentGraph {
                name: name.to_string(),
                version: version.to_string(),
            })
    }
}

/// Per-branch walk state: the nodes currently on the path, results of
/// cycle-free nodes already fully ascended, and the cycles met so far (both
/// shared across branches).
struct Ascent<'m> {
    path: Vec<PackageItem>,
    memo: &'m mut HashMap<(String, String), Vec<String>>,
    cycles: &'m mut Vec<ModWhyError>,
    cycle_hits: usize,
}

impl Ascent<'_> {
    /// Keeps the names found through one parent edge. A cycle closed by that
    /// edge is recorded and yields nothing; any other error is returned.
    fn follow(
        &mut self,
        result: Result<Vec<String>, ModWhyError>,
    ) -> Result<Vec<String>, ModWhyError> {
        match result {
            Ok(names) => Ok(names),
            Err(cycle @ ModWhyError::CycleDetected { .. }) => {
                self.cycle_hits += 1;
                if !self.cycles.contains(&cycle) {
                    self.cycles.push(cycle);
                }
                Ok(Vec::new())
            }
            Err(other) => Err(other),
        }
    }

    fn enter(&mut self, name: &str, version: &str) -> Result<(), ModWhyError> {
        let item = PackageItem {
            name: name.to_string(),
            version: version.to_string(),
        };

        if let Some(start) = self.path.iter().position(|p| *p == item) {
            let mut chain: Vec<String> = self.path[start..].iter().map(|p| p.to_string()).collect();
            chain.push(item.to_string());
            return Err(ModWhyError::CycleDetected { chain });
        }

        self.path.push(item);
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

/// Removes duplicates while keeping first-seen order
fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_graph::services::GraphBuilder;

    fn graph(input: &str, indirect: &[&str]) -> Graph {
        GraphBuilder::new()
            .build(input, indirect.iter().map(|s| s.to_string()).collect())
            .unwrap()
    }

    #[test]
    fn test_scenario_transitive_module() {
        let graph = graph("root@ a@1.0.0\na@1.0.0 b@2.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        let b = graph.package("b").unwrap();

        assert!(!resolver.is_direct_dependency(b));
        let path = resolver.find_upgrade_path(b).unwrap();
        assert_eq!(path.packages, vec!["a"]);
        assert!(path.cycles.is_empty());
    }

    #[test]
    fn test_scenario_direct_module() {
        let graph = graph("root@ a@1.0.0\na@1.0.0 b@2.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        assert!(resolver.is_direct_dependency(graph.package("a").unwrap()));
    }

    #[test]
    fn test_scenario_indirect_despite_root_edge() {
        let graph = graph(
            "root@ a@1.0.0\na@1.0.0 b@2.0.0\nroot@ b@2.0.0\n",
            &["b"],
        );
        let resolver = RootCauseResolver::new(&graph);
        let b = graph.package("b").unwrap();

        assert!(!resolver.is_direct_dependency(b));
        assert_eq!(resolver.find_upgrade_path(b).unwrap().packages, vec!["a"]);
    }

    #[test]
    fn test_is_direct_dependency_requires_root_parent() {
        let graph = graph("root@ a@v1.0.0\na@v1.0.0 b@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        assert!(!resolver.is_direct_dependency(graph.package("b").unwrap()));
    }

    #[test]
    fn test_is_direct_dependency_false_without_versions() {
        let graph = graph("root@ a@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        assert!(!resolver.is_direct_dependency(&Package::new("ghost")));
    }

    #[test]
    fn test_is_direct_dependency_any_version() {
        // an older version reached transitively, the selected one required by root
        let graph = graph("root@ a@v1.2.0\nx@v1.0.0 a@v1.0.0\nroot@ x@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        assert!(resolver.is_direct_dependency(graph.package("a").unwrap()));
    }

    #[test]
    fn test_ascent_stops_at_first_direct_module() {
        let graph = graph(
            "root@ top@v1.0.0\ntop@v1.0.0 mid@v1.0.0\nroot@ mid@v1.0.0\nmid@v1.0.0 leaf@v1.0.0\n",
            &[],
        );
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("leaf").unwrap())
            .unwrap();
        assert_eq!(path.packages, vec!["mid"]);
    }

    #[test]
    fn test_ascent_continues_through_indirect_modules() {
        let graph = graph(
            "root@ top@v1.0.0\ntop@v1.0.0 mid@v1.0.0\nroot@ mid@v1.0.0\nmid@v1.0.0 leaf@v1.0.0\n",
            &["mid"],
        );
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("leaf").unwrap())
            .unwrap();
        assert_eq!(path.packages, vec!["top"]);
    }

    #[test]
    fn test_diamond_is_reported_once() {
        let input = "root@ y@v1.0.0\n\
                     y@v1.0.0 p@v1.0.0\n\
                     y@v1.0.0 q@v1.0.0\n\
                     p@v1.0.0 x@v1.0.0\n\
                     q@v1.0.0 x@v1.1.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("x").unwrap())
            .unwrap();
        assert_eq!(path.packages, vec!["y"]);
    }

    #[test]
    fn test_multiple_direct_modules_first_seen_order() {
        let input = "root@ a@v1.0.0\n\
                     root@ b@v1.0.0\n\
                     a@v1.0.0 t@v1.0.0\n\
                     b@v1.0.0 t@v1.0.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();
        assert_eq!(path.packages, vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_terminates_with_error() {
        let input = "a@v1.0.0 b@v1.0.0\n\
                     b@v1.0.0 a@v1.0.0\n\
                     a@v1.0.0 t@v1.0.0\n\
                     root@ z@v1.0.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();

        assert!(path.packages.is_empty());
        assert_eq!(path.cycles.len(), 1);
        assert_eq!(
            path.cycles[0],
            ModWhyError::CycleDetected {
                chain: vec![
                    "a@v1.0.0".to_string(),
                    "b@v1.0.0".to_string(),
                    "a@v1.0.0".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_cycle_through_target_itself() {
        let graph = graph("t@v1.0.0 a@v1.0.0\na@v1.0.0 t@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();
        assert!(matches!(
            path.cycles.as_slice(),
            [ModWhyError::CycleDetected { .. }]
        ));
    }

    #[test]
    fn test_cycle_does_not_drop_sibling_branches() {
        let input = "root@ good@v1.0.0\n\
                     good@v1.0.0 t@v1.0.0\n\
                     c1@v1.0.0 c2@v1.0.0\n\
                     c2@v1.0.0 c1@v1.0.0\n\
                     c1@v1.0.0 t@v1.0.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();

        assert_eq!(path.packages, vec!["good"]);
        assert_eq!(path.cycles.len(), 1);
    }

    #[test]
    fn test_ascend_records_cycle_and_skips_memo() {
        let graph = graph("a@v1.0.0 b@v1.0.0\nb@v1.0.0 a@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        let (a, a_v1) = graph.package_version("a", "v1.0.0").unwrap();

        let mut memo = HashMap::new();
        let mut cycles = Vec::new();
        let mut ascent = Ascent {
            path: Vec::new(),
            memo: &mut memo,
            cycles: &mut cycles,
            cycle_hits: 0,
        };
        let found = resolver.ascend(a, a_v1, &mut ascent).unwrap();

        assert!(found.is_empty());
        assert!(ascent.path.is_empty());
        assert!(memo.is_empty());
        assert_eq!(
            cycles,
            vec![ModWhyError::CycleDetected {
                chain: vec![
                    "a@v1.0.0".to_string(),
                    "b@v1.0.0".to_string(),
                    "a@v1.0.0".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_cycle_deep_in_branch_keeps_sibling_parent() {
        // p has two parents: c closes a cycle back to p, d is required by root
        let input = "root@ d@v1.0.0\n\
                     d@v1.0.0 p@v1.0.0\n\
                     c@v1.0.0 p@v1.0.0\n\
                     p@v1.0.0 c@v1.0.0\n\
                     p@v1.0.0 t@v1.0.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();

        assert_eq!(path.packages, vec!["d"]);
        assert_eq!(
            path.cycles,
            vec![ModWhyError::CycleDetected {
                chain: vec![
                    "p@v1.0.0".to_string(),
                    "c@v1.0.0".to_string(),
                    "p@v1.0.0".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_cycle_seen_from_two_entry_points() {
        // a and b require each other and both require t
        let input = "root@ r@v1.0.0\n\
                     r@v1.0.0 a@v1.0.0\n\
                     a@v1.0.0 b@v1.0.0\n\
                     b@v1.0.0 a@v1.0.0\n\
                     a@v1.0.0 t@v1.0.0\n\
                     b@v1.0.0 t@v1.0.0\n";
        let graph = graph(input, &[]);
        let resolver = RootCauseResolver::new(&graph);
        let path = resolver
            .find_upgrade_path(graph.package("t").unwrap())
            .unwrap();

        assert_eq!(path.packages, vec!["r"]);
        assert_eq!(path.cycles.len(), 2);
        assert!(path.cycles.contains(&ModWhyError::CycleDetected {
            chain: vec![
                "a@v1.0.0".to_string(),
                "b@v1.0.0".to_string(),
                "a@v1.0.0".to_string(),
            ],
        }));
        assert!(path.cycles.contains(&ModWhyError::CycleDetected {
            chain: vec![
                "b@v1.0.0".to_string(),
                "a@v1.0.0".to_string(),
                "b@v1.0.0".to_string(),
            ],
        }));
    }

    #[test]
    fn test_inconsistent_graph_is_fatal() {
        let mut graph = graph("root@ a@v1.0.0\n", &[]);
        // An edge to a parent version that was never recorded
        let orphan_parent = PackageItem::parse("ghost@v9.9.9");
        let child = PackageItem::parse("a@v1.0.0");
        graph.link(&orphan_parent, &child);

        let resolver = RootCauseResolver::new(&graph);
        let err = resolver
            .find_upgrade_path(graph.package("a").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ModWhyError::InconsistentGraph {
                name: "ghost".to_string(),
                version: "v9.9.9".to_string(),
            }
        );
    }

    #[test]
    fn test_no_root_means_nothing_is_direct() {
        let graph = graph("a@v1.0.0 b@v1.0.0\n", &[]);
        let resolver = RootCauseResolver::new(&graph);
        assert!(!resolver.is_direct_dependency(graph.package("a").unwrap()));
        let path = resolver
            .find_upgrade_path(graph.package("b").unwrap())
            .unwrap();
        assert!(path.is_empty());
        assert!(path.cycles.is_empty());
    }
}

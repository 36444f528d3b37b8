use super::{Package, PackageItem, PackageVersion};
use std::collections::{HashMap, HashSet};

/// Graph aggregate: every module and version reachable from the main
/// module, as reported by `go mod graph`.
///
/// Built once by `GraphBuilder` and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    root: Option<String>,
    root_indirect_mods: HashSet<String>,
    packages: HashMap<String, Package>,
}

impl Graph {
    pub fn new(root_indirect_mods: HashSet<String>) -> Self {
        Self {
            root: None,
            root_indirect_mods,
            packages: HashMap::new(),
        }
    }

    /// Name of the main module, if the input contained it
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn is_root(&self, name: &str) -> bool {
        self.root.as_deref() == Some(name)
    }

    pub fn root_indirect_mods(&self) -> &HashSet<String> {
        &self.root_indirect_mods
    }

    /// Whether go.mod marks `name` as `// indirect`
    pub fn is_root_indirect_mod(&self, name: &str) -> bool {
        self.root_indirect_mods.contains(name)
    }

    pub fn packages(&self) -> &HashMap<String, Package> {
        &self.packages
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn package_version(&self, name: &str, version: &str) -> Option<(&Package, &PackageVersion)> {
        let package = self.packages.get(name)?;
        let package_version = package.version(version)?;
        Some((package, package_version))
    }

    /// Packages ordered by module name
    pub fn sorted_packages(&self) -> Vec<&Package> {
        let mut packages: Vec<&Package> = self.packages.values().collect();
        packages.sort_by(|a, b| a.name().cmp(b.name()));
        packages
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn edge_count(&self) -> usize {
        self.packages
            .values()
            .flat_map(|p| p.versions().values())
            .map(|v| v.deps().len())
            .sum()
    }

    /// Creates the package/version entries for `item` if they are missing.
    pub(crate) fn observe(&mut self, item: &PackageItem) {
        self.packages
            .entry(item.name.clone())
            .or_insert_with(|| Package::new(item.name.clone()))
            .observe_version(&item.version);

        if item.is_root() {
            self.root = Some(item.name.clone());
        }
    }

    /// Records `from -> to` on both endpoints. Both must have been observed.
    pub(crate) fn link(&mut self, from: &PackageItem, to: &PackageItem) {
        if let Some(v) = self
            .packages
            .get_mut(&from.name)
            .and_then(|p| p.version_mut(&from.version))
        {
            v.add_dep(&to.name, &to.version);
        }
        if let Some(v) = self
            .packages
            .get_mut(&to.name)
            .and_then(|p| p.version_mut(&to.version))
        {
            v.add_parent(&from.name, &from.version);
        }
    }
}

use super::version::compare_versions;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One node token of the edge list: `name` or `name@version`.
///
/// An empty version marks the main module (the graph root).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageItem {
    pub name: String,
    pub version: String,
}

impl PackageItem {
    /// Splits a token on its last `@`. A token without `@` is a bare name
    /// with an empty version.
    pub fn parse(token: &str) -> Self {
        match token.rfind('@') {
            Some(i) => Self {
                name: token[..i].to_string(),
                version: token[i + 1..].to_string(),
            },
            None => Self {
                name: token.to_string(),
                version: String::new(),
            },
        }
    }

    pub fn is_root(&self) -> bool {
        self.version.is_empty()
    }
}

impl fmt::Display for PackageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}@{}", self.name, self.version)
        }
    }
}

/// One concrete version of a module together with its incoming and
/// outgoing edges.
///
/// Both maps are keyed by module name, so each neighbouring module
/// contributes a single entry holding the version used on that edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    version: String,
    parents: BTreeMap<String, String>,
    deps: BTreeMap<String, String>,
}

impl PackageVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            parents: BTreeMap::new(),
            deps: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Parent module name -> parent version, ordered by name
    pub fn parents(&self) -> &BTreeMap<String, String> {
        &self.parents
    }

    /// Dependency module name -> dependency version, ordered by name
    pub fn deps(&self) -> &BTreeMap<String, String> {
        &self.deps
    }

    pub fn has_parent(&self, name: &str) -> bool {
        self.parents.contains_key(name)
    }

    pub(crate) fn add_parent(&mut self, name: &str, version: &str) {
        self.parents.insert(name.to_string(), version.to_string());
    }

    pub(crate) fn add_dep(&mut self, name: &str, version: &str) {
        self.deps.insert(name.to_string(), version.to_string());
    }
}

/// Every observed version of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    last_version: String,
    versions: HashMap<String, PackageVersion>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_version: String::new(),
            versions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest version observed. Empty for the root module.
    pub fn last_version(&self) -> &str {
        &self.last_version
    }

    pub fn versions(&self) -> &HashMap<String, PackageVersion> {
        &self.versions
    }

    pub fn version(&self, version: &str) -> Option<&PackageVersion> {
        self.versions.get(version)
    }

    /// Versions ordered from highest to lowest.
    pub fn sorted_versions(&self) -> Vec<&PackageVersion> {
        let mut versions: Vec<&PackageVersion> = self.versions.values().collect();
        versions.sort_by(|a, b| {
            compare_versions(b.version(), a.version()).then_with(|| b.version().cmp(a.version()))
        });
        versions
    }

    /// Returns the entry for `version`, creating it on first sight and
    /// bumping `last_version` when it is the highest seen so far.
    ///
    /// The root's empty version never takes part in the ranking.
    pub(crate) fn observe_version(&mut self, version: &str) -> &mut PackageVersion {
        if !version.is_empty()
            && (self.last_version.is_empty()
                || compare_versions(&self.last_version, version).is_lt())
        {
            self.last_version = version.to_string();
        }

        self.versions
            .entry(version.to_string())
            .or_insert_with(|| PackageVersion::new(version))
    }

    pub(crate) fn version_mut(&mut self, version: &str) -> Option<&mut PackageVersion> {
        self.versions.get_mut(version)
    }
}

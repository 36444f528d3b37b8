//! Views for dumping the reconstructed module graph

use serde::Serialize;

/// One edge endpoint as seen from a module version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub name: String,
    pub version: String,
    /// The endpoint is the main module
    pub is_root: bool,
    /// Only set on root parents: go.mod marks the child `// indirect`
    pub is_indirect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionView {
    pub version: String,
    pub is_last: bool,
    pub parents: Vec<EdgeView>,
    pub deps: Vec<EdgeView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageView {
    pub name: String,
    pub last_version: String,
    /// Highest version first
    pub versions: Vec<VersionView>,
}

/// Dump of the whole graph or of a single module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub root: Option<String>,
    /// Ordered by module name
    pub packages: Vec<PackageView>,
}

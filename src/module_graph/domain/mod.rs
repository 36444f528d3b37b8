pub mod graph;
pub mod package;
pub mod version;

pub use graph::Graph;
pub use package::{Package, PackageItem, PackageVersion};
pub use version::compare_versions;

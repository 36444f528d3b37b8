mod graph_builder;
mod indirect_modules;
mod package_filter;
mod root_cause_resolver;

pub use graph_builder::GraphBuilder;
pub use indirect_modules::parse_indirect_modules;
pub use package_filter::PackageFilter;
pub use root_cause_resolver::{RootCauseResolver, UpgradePath};

//! Read models
//!
//! View-optimized structs handed to formatters. They are flat, ordered and
//! serializable, so every formatter renders the same data.

pub mod explanation_view;
pub mod graph_view;
mod graph_view_builder;

pub use explanation_view::{Explanation, ExplanationReport, LookupFailureView, RequiredModuleView};
pub use graph_view::{EdgeView, GraphView, PackageView, VersionView};
pub use graph_view_builder::GraphViewBuilder;

//! modwhy - explain why a Go module is in your build
//!
//! Reconstructs the module graph printed by `go mod graph` and answers two
//! questions about a module: does the main module require it directly, and
//! if not, which direct requirements pull it in and have to be upgraded to
//! move it to a newer version.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`module_graph`): Graph model, parser and resolver
//! - **Application Layer** (`application`): Use cases, requests and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): go toolchain, files, module proxy, formatters
//! - **Shared** (`shared`): Error types and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use modwhy::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ExplainModuleUseCase::new(
//!     GoModuleGraphSource::default(),
//!     None::<GoProxyClient>,
//!     StderrProgressReporter::new(),
//! );
//!
//! let report = use_case
//!     .execute(ExplainRequest::new(".", "golang.org/x/text"))
//!     .await?;
//!
//! let output = TextFormatter::new(false).format_explanation(&report)?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod module_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileGraphSource, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{CachingVersionRepository, GoProxyClient};
    pub use crate::adapters::outbound::toolchain::GoModuleGraphSource;
    pub use crate::application::dto::{ExplainRequest, InspectRequest, OutputFormat};
    pub use crate::application::read_models::{Explanation, ExplanationReport, GraphView};
    pub use crate::application::use_cases::{ExplainModuleUseCase, InspectGraphUseCase};
    pub use crate::module_graph::domain::{Graph, Package, PackageItem, PackageVersion};
    pub use crate::module_graph::services::{
        GraphBuilder, PackageFilter, RootCauseResolver, UpgradePath,
    };
    pub use crate::ports::outbound::{
        LatestVersionInfo, LatestVersionRepository, ModuleGraphSource, OutputPresenter,
        ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::error::{ExitCode, ModWhyError};
    pub use crate::shared::Result;
}

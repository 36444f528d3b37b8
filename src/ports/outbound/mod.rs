/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (go toolchain, module proxy,
/// console, output destinations).
pub mod formatter;
pub mod module_graph_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod version_repository;

pub use formatter::ReportFormatter;
pub use module_graph_source::ModuleGraphSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use version_repository::{LatestVersionInfo, LatestVersionRepository, ModuleOrigin};

/// Mock implementations for testing
mod mock_graph_source;
mod mock_progress_reporter;
mod mock_version_repository;

pub use mock_graph_source::MockGraphSource;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_version_repository::MockVersionRepository;

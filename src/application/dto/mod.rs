/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use cases, keeping the domain
/// layer isolated.
mod explain_request;
mod inspect_request;
mod output_format;

pub use explain_request::ExplainRequest;
pub use inspect_request::InspectRequest;
pub use output_format::OutputFormat;

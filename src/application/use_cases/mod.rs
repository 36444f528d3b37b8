/// Use cases module containing application business logic orchestration
mod explain_module;
mod inspect_graph;
mod load_graph;

pub use explain_module::ExplainModuleUseCase;
pub use inspect_graph::InspectGraphUseCase;

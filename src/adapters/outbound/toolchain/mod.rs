/// Adapters driving the go toolchain
mod go_command;

pub use go_command::{GoModuleGraphSource, DEFAULT_GO_BINARY};

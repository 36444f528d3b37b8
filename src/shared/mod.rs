/// Shared utilities: error taxonomy, exit codes and file safety checks.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;

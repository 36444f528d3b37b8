use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Remote version lookup failures are not fatal and still exit with
/// `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced (possibly with non-fatal lookup warnings)
    Success = 0,
    /// Missing module, malformed graph, failed go command, bad configuration, ...
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// The reconstructed graph contradicts itself
    InternalError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error that reached `main`.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ModWhyError>() {
            Some(ModWhyError::InconsistentGraph { .. }) => ExitCode::InternalError,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::InternalError => write!(f, "Internal Error (3)"),
        }
    }
}

/// Application-specific errors.
///
/// Graph construction and resolution return these directly so callers can
/// match on the failure kind; the application layer lifts them into
/// `anyhow::Error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModWhyError {
    #[error("Malformed module graph line: expected 2 fields but got {field_count}: {line:?}\n\n💡 Hint: Each line must look like `parent[@version] child@version`")]
    MalformedInput { line: String, field_count: usize },

    #[error("Module '{name}' not found in dependencies")]
    PackageNotFound { name: String },

    #[error("Internal error: module '{name}' version '{version}' is referenced by an edge but was never recorded")]
    InconsistentGraph { name: String, version: String },

    #[error("Dependency cycle detected while walking parents: {}", chain.join(" -> "))]
    CycleDetected { chain: Vec<String> },

    #[error("Failed to look up latest version of '{module}': {details}")]
    RemoteLookup { module: String, details: String },

    #[error("Command `{command}` failed\nDetails: {details}\n\n💡 Hint: Make sure the go toolchain is installed and the directory contains a go.mod file")]
    CommandFailed { command: String, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid Go module directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for patterns, config values and requests
    #[error("Validation error: {message}")]
    Validation { message: String },
}

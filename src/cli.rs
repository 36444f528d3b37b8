use crate::application::dto::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Explain why a Go module is in your build and what to upgrade to move it
#[derive(Parser, Debug)]
#[command(name = "modwhy")]
#[command(version)]
#[command(
    about = "Explain why a Go module is in your dependency graph and which direct requirements must be upgraded to move it",
    long_about = None
)]
pub struct Args {
    /// Module path to explain, e.g. golang.org/x/text
    #[arg(value_name = "MODULE", required_unless_present = "print")]
    pub module: Option<String>,

    /// Dump the whole graph, or only MODULE's versions, parents and deps
    #[arg(short, long)]
    pub print: bool,

    /// Query the module proxy for the latest version of each module to upgrade
    #[arg(short = 'v', long = "show-latest")]
    pub show_latest: bool,

    /// Path to the Go module directory
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Read a saved `go mod graph` output instead of running go
    #[arg(long, value_name = "FILE")]
    pub graph_file: Option<PathBuf>,

    /// Read a saved `go list -f "{{.Indirect}} {{.Path}}" -m all` output
    #[arg(long, value_name = "FILE", requires = "graph_file")]
    pub indirect_file: Option<PathBuf>,

    /// Exclude modules matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "golang.org/x/*" -e "*/internal"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output format: text or json [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only print errors and warnings to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,

    /// Config file to use instead of modwhy.config.yml in the project directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

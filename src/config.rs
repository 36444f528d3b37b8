//! Configuration file support for modwhy.
//!
//! Provides YAML-based configuration through `modwhy.config.yml` files,
//! including file loading, validation and merging with CLI flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::network::DEFAULT_TIMEOUT_SECS;
use crate::adapters::outbound::toolchain::DEFAULT_GO_BINARY;
use crate::application::dto::OutputFormat;
use crate::cli::Args;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "modwhy.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub exclude_packages: Option<Vec<String>>,
    pub show_latest: Option<bool>,
    pub proxy_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub go_binary: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to `null`, treat it as "no settings"
    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!(
                "Invalid config: format: {}\n\n💡 Hint: Use 'text' or 'json'.",
                e
            );
        }
    }

    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT_SECS
        );
    }

    if let Some(url) = &config.proxy_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!(
                "Invalid config: proxy_url '{}' must start with http:// or https://",
                url
            );
        }
    }

    if let Some(go_binary) = &config.go_binary {
        if go_binary.trim().is_empty() {
            bail!("Invalid config: go_binary must not be empty.");
        }
    }

    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings after applying CLI flags over the config file over
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    /// Config patterns first, then CLI patterns
    pub exclude_patterns: Vec<String>,
    pub show_latest: bool,
    /// Explicit proxy from the config file; `GOPROXY` is consulted later
    pub proxy_url: Option<String>,
    pub timeout: Duration,
    pub go_binary: String,
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, &config.format) {
            (Some(format), _) => format,
            (None, Some(format)) => format
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!(e))?,
            (None, None) => OutputFormat::default(),
        };

        let mut exclude_patterns = config.exclude_packages.unwrap_or_default();
        exclude_patterns.extend(args.exclude.iter().cloned());

        Ok(Self {
            format,
            exclude_patterns,
            show_latest: args.show_latest || config.show_latest.unwrap_or(false),
            proxy_url: config.proxy_url,
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            go_binary: config
                .go_binary
                .unwrap_or_else(|| DEFAULT_GO_BINARY.to_string()),
            output: args.output.clone(),
        })
    }
}

/// Loads the config named by `--config`, or looks for one in the project
/// directory.
pub fn load_for_args(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => load_config_from_path(path).map(Some),
        None => discover_config(&args.path),
    }
}

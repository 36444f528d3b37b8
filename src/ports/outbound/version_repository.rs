use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a published module version comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleOrigin {
    pub vcs: Option<String>,
    pub url: Option<String>,
    pub reference: Option<String>,
    pub hash: Option<String>,
}

/// Latest published version of a module, as reported by a module proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestVersionInfo {
    pub version: String,
    pub time: Option<DateTime<Utc>>,
    pub origin: Option<ModuleOrigin>,
}

impl LatestVersionInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            time: None,
            origin: None,
        }
    }
}

/// LatestVersionRepository port for looking up the newest published version
///
/// Implementations must be `Send + Sync` so lookups can run concurrently.
#[async_trait]
pub trait LatestVersionRepository: Send + Sync {
    /// Fetches the latest version of `module`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The module path is not safe to put in a URL
    /// - The network request fails
    /// - The proxy answers with a non-success status
    /// - The response body cannot be decoded
    async fn fetch_latest_version(&self, module: &str) -> Result<LatestVersionInfo>;
}

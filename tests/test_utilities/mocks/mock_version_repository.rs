use async_trait::async_trait;
use modwhy::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock LatestVersionRepository with canned versions; unknown modules fail
#[derive(Clone, Default)]
pub struct MockVersionRepository {
    versions: HashMap<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl MockVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, module: &str, version: &str) -> Self {
        self.versions.insert(module.to_string(), version.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LatestVersionRepository for MockVersionRepository {
    async fn fetch_latest_version(&self, module: &str) -> Result<LatestVersionInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.versions.get(module) {
            Some(version) => Ok(LatestVersionInfo::new(version.clone())),
            None => anyhow::bail!("bad status: 404 Not Found"),
        }
    }
}

use crate::ports::outbound::{LatestVersionInfo, LatestVersionRepository};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// CachingVersionRepository wraps a LatestVersionRepository and remembers
/// successful lookups per module path.
///
/// Failures are not cached, so a later call retries them. The cache is
/// safe to share between concurrent lookups.
pub struct CachingVersionRepository<R: LatestVersionRepository> {
    inner: R,
    cache: DashMap<String, LatestVersionInfo>,
}

impl<R: LatestVersionRepository> CachingVersionRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: LatestVersionRepository> LatestVersionRepository for CachingVersionRepository<R> {
    async fn fetch_latest_version(&self, module: &str) -> Result<LatestVersionInfo> {
        if let Some(cached) = self.cache.get(module) {
            return Ok(cached.clone());
        }

        let info = self.inner.fetch_latest_version(module).await?;
        self.cache.insert(module.to_string(), info.clone());
        Ok(info)
    }
}

/// Network adapters for module proxy lookups
mod caching_version_repository;
mod go_proxy_client;

pub use caching_version_repository::CachingVersionRepository;
pub use go_proxy_client::{
    escape_module_path, resolve_proxy_url, GoProxyClient, DEFAULT_PROXY_URL, DEFAULT_TIMEOUT_SECS,
};

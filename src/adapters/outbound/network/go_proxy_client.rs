use crate::ports::outbound::{LatestVersionInfo, LatestVersionRepository, ModuleOrigin};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Public Go module mirror, used when nothing else is configured
pub const DEFAULT_PROXY_URL: &str = "https://proxy.golang.org";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const MAX_RETRIES: u32 = 3;

/// Body of `GET {proxy}/{module}/@latest`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LatestResponse {
    #[serde(default)]
    version: String,
    #[serde(default)]
    time: Option<DateTime<Utc>>,
    #[serde(default)]
    origin: Option<OriginResponse>,
}

#[derive(Debug, Deserialize)]
struct OriginResponse {
    #[serde(rename = "VCS", default)]
    vcs: Option<String>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "Ref", default)]
    reference: Option<String>,
    #[serde(rename = "Hash", default)]
    hash: Option<String>,
}

impl From<OriginResponse> for ModuleOrigin {
    fn from(origin: OriginResponse) -> Self {
        Self {
            vcs: origin.vcs,
            url: origin.url,
            reference: origin.reference,
            hash: origin.hash,
        }
    }
}

/// GoProxyClient adapter querying a GOPROXY-protocol module proxy
///
/// Uses the async reqwest client so lookups for several modules can run
/// concurrently. Failed requests are retried with a linear backoff.
pub struct GoProxyClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl GoProxyClient {
    /// Creates a client for `base_url` (trailing slashes are dropped)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let user_agent = format!("modwhy/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: MAX_RETRIES,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<LatestResponse> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<LatestResponse> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("bad status: {}", response.status());
        }

        let body: LatestResponse = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl LatestVersionRepository for GoProxyClient {
    async fn fetch_latest_version(&self, module: &str) -> Result<LatestVersionInfo> {
        validate_module_path(module)?;

        let url = format!("{}/{}/@latest", self.base_url, escape_module_path(module));
        let body = self.fetch_with_retry(&url).await?;

        if body.version.is_empty() {
            anyhow::bail!("proxy response for '{}' has no Version", module);
        }

        Ok(LatestVersionInfo {
            version: body.version,
            time: body.time,
            origin: body.origin.map(ModuleOrigin::from),
        })
    }
}

/// Picks the proxy base URL.
///
/// An explicit value wins. Otherwise the first `http(s)` entry of a
/// `GOPROXY`-style list is used (`direct` and `off` are skipped), falling
/// back to `DEFAULT_PROXY_URL`.
pub fn resolve_proxy_url(configured: Option<&str>, goproxy: Option<&str>) -> String {
    if let Some(url) = configured {
        return url.to_string();
    }

    goproxy
        .into_iter()
        .flat_map(|list| list.split([',', '|']))
        .map(str::trim)
        .find(|entry| entry.starts_with("https://") || entry.starts_with("http://"))
        .unwrap_or(DEFAULT_PROXY_URL)
        .to_string()
}

/// Case-encodes a module path for proxy URLs: every upper-case letter
/// becomes `!` followed by its lower-case form.
pub fn escape_module_path(module: &str) -> String {
    let mut escaped = String::with_capacity(module.len());
    for c in module.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Rejects module paths that could change the meaning of the request URL
fn validate_module_path(module: &str) -> Result<()> {
    if module.is_empty() {
        anyhow::bail!("Security: module path is empty");
    }

    if module.contains("..") {
        anyhow::bail!("Security: module path contains '..' which is not allowed");
    }

    if module.starts_with('/') || module.contains('\\') {
        anyhow::bail!("Security: module path contains invalid path separators");
    }

    if module
        .chars()
        .any(|c| matches!(c, '?' | '#' | '@') || c.is_whitespace())
    {
        anyhow::bail!("Security: module path contains URL-unsafe characters");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serves the same raw HTTP response to every connection and counts
    /// requests
    fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn client(base_url: &str) -> GoProxyClient {
        GoProxyClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_escape_module_path() {
        assert_eq!(
            escape_module_path("github.com/BurntSushi/toml"),
            "github.com/!burnt!sushi/toml"
        );
        assert_eq!(escape_module_path("golang.org/x/net"), "golang.org/x/net");
    }

    #[test]
    fn test_validate_module_path() {
        assert!(validate_module_path("golang.org/x/net").is_ok());
        assert!(validate_module_path("gopkg.in/yaml.v3").is_ok());

        for bad in ["", "a/../b", "a?b", "a#b", "a@v1", "a\\b", "a b", "/etc/passwd"] {
            assert!(validate_module_path(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_resolve_proxy_url_precedence() {
        assert_eq!(
            resolve_proxy_url(Some("https://mirror.local"), Some("https://goproxy.io")),
            "https://mirror.local"
        );
        assert_eq!(
            resolve_proxy_url(None, Some("off|https://goproxy.io,direct")),
            "https://goproxy.io"
        );
        assert_eq!(resolve_proxy_url(None, Some("direct")), DEFAULT_PROXY_URL);
        assert_eq!(resolve_proxy_url(None, None), DEFAULT_PROXY_URL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        assert_eq!(client("http://proxy.local/").base_url(), "http://proxy.local");
    }

    #[tokio::test]
    async fn test_fetch_latest_version() {
        let (url, hits) = serve(
            "200 OK",
            r#"{"Version":"v0.17.0","Time":"2023-10-10T18:39:02Z","Origin":{"VCS":"git","URL":"https://go.googlesource.com/net","Ref":"refs/tags/v0.17.0","Hash":"b225e7ca6dde1ef5a5ae5ce922861bda011cfabd"}}"#,
        );

        let info = client(&url)
            .fetch_latest_version("golang.org/x/net")
            .await
            .unwrap();

        assert_eq!(info.version, "v0.17.0");
        assert!(info.time.is_some());
        let origin = info.origin.unwrap();
        assert_eq!(origin.vcs.as_deref(), Some("git"));
        assert_eq!(origin.reference.as_deref(), Some("refs/tags/v0.17.0"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_minimal_body() {
        let (url, _) = serve("200 OK", r#"{"Version":"v1.0.0"}"#);
        let info = client(&url).fetch_latest_version("example.com/a").await.unwrap();
        assert_eq!(info, LatestVersionInfo::new("v1.0.0"));
    }

    #[tokio::test]
    async fn test_bad_status_is_retried() {
        let (url, hits) = serve("404 Not Found", "not found");
        let err = client(&url)
            .fetch_latest_version("example.com/missing")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("bad status"));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let (url, _) = serve("200 OK", "<html></html>");
        assert!(client(&url)
            .fetch_latest_version("example.com/a")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_unsafe_module_is_never_requested() {
        let (url, hits) = serve("200 OK", r#"{"Version":"v1.0.0"}"#);
        assert!(client(&url)
            .fetch_latest_version("example.com/a?x=1")
            .await
            .is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}

use std::time::Instant;

use super::cache::{CacheConfig, ResponseCache};
use super::error::LoadError;
use super::transport::{HttpTransport, Transport, TransportResponse};

/// Content kind, used both for body validation and as the cache-key prefix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ContentKind {
    Text,
    Json,
}

impl ContentKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Text => "text::",
            Self::Json => "json::",
        }
    }
}

/// Loads text and JSON resources over HTTP, with per-call opt-in caching.
///
/// Relative URLs resolve against the manager's origin; the cache key is the
/// content-kind prefix concatenated with the resolved absolute URL, so the
/// same path requested as text and as JSON occupies two entries.
///
/// Entries are stored only on successful fetches. There are no retries, no
/// timeouts, and no cancellation: an issued request runs to completion.
pub struct ResourceManager<T = HttpTransport> {
    transport: T,
    origin: reqwest::Url,
    cache: ResponseCache,
}

impl ResourceManager<HttpTransport> {
    /// Creates a manager with the default HTTP transport.
    ///
    /// `origin` must be an absolute URL; it anchors relative resource paths.
    pub fn new(origin: &str, config: CacheConfig) -> Result<Self, LoadError> {
        Self::with_transport(origin, config, HttpTransport::new())
    }
}

impl<T: Transport> ResourceManager<T> {
    /// Creates a manager over a custom transport.
    pub fn with_transport(origin: &str, config: CacheConfig, transport: T) -> Result<Self, LoadError> {
        let origin = reqwest::Url::parse(origin).map_err(|e| LoadError::Url {
            url: origin.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            transport,
            origin,
            cache: ResponseCache::new(config),
        })
    }

    /// Fetches the contents of a text file.
    ///
    /// `cache` stores the response for subsequent calls; `force_reload`
    /// issues a fresh GET even when a cached entry exists (the fresh
    /// response still replaces the entry when caching is on).
    pub async fn load_text_file(
        &mut self,
        url: &str,
        cache: bool,
        force_reload: bool,
    ) -> Result<String, LoadError> {
        let (resolved, response) = self.fetch(url, cache, force_reload, ContentKind::Text).await?;
        String::from_utf8(response.body).map_err(|_| LoadError::NotText { url: resolved })
    }

    /// Fetches the contents of a JSON file as a parsed value.
    ///
    /// The body must decode to an object or array; scalar documents fail
    /// with [`LoadError::UnexpectedType`].
    pub async fn load_json_file(
        &mut self,
        url: &str,
        cache: bool,
        force_reload: bool,
    ) -> Result<serde_json::Value, LoadError> {
        let (resolved, response) = self.fetch(url, cache, force_reload, ContentKind::Json).await?;

        let value: serde_json::Value =
            serde_json::from_slice(&response.body).map_err(|source| LoadError::Json {
                url: resolved.clone(),
                source,
            })?;

        match value {
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => Ok(value),
            _ => Err(LoadError::UnexpectedType { url: resolved }),
        }
    }

    /// Number of cached responses currently held.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    async fn fetch(
        &mut self,
        url: &str,
        cache: bool,
        force_reload: bool,
        kind: ContentKind,
    ) -> Result<(String, TransportResponse), LoadError> {
        let resolved = self.origin.join(url).map_err(|e| LoadError::Url {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let resolved = String::from(resolved);
        let key = format!("{}{}", kind.prefix(), resolved);

        if cache && !force_reload {
            if let Some(hit) = self.cache.get(&key, Instant::now()) {
                log::debug!("cache hit for {key}");
                return Ok((resolved, hit.clone()));
            }
        }

        let response = self.transport.get(&resolved).await?;
        if !response.is_success() {
            return Err(LoadError::Status {
                status: response.status,
                url: resolved,
            });
        }

        if cache {
            self.cache.insert(key, response.clone(), Instant::now());
        }

        Ok((resolved, response))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::super::error::TransportError;
    use super::*;

    /// In-memory transport that counts GETs per URL.
    #[derive(Default)]
    struct FakeTransport {
        responses: HashMap<String, TransportResponse>,
        requests: AtomicUsize,
    }

    impl FakeTransport {
        fn with(self, url: &str, status: u16, body: &str) -> Self {
            self.with_raw(url, status, body.as_bytes().to_vec())
        }

        fn with_raw(mut self, url: &str, status: u16, body: Vec<u8>) -> Self {
            self.responses
                .insert(url.to_owned(), TransportResponse { status, body });
            self
        }

        fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl Transport for &FakeTransport {
        async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::Other(format!("connection refused: {url}")))
        }
    }

    fn manager(transport: &FakeTransport) -> ResourceManager<&FakeTransport> {
        ResourceManager::with_transport("http://game.test", CacheConfig::default(), transport)
            .unwrap()
    }

    // ── caching ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn cached_load_issues_one_request() {
        let t = FakeTransport::default().with("http://game.test/a.txt", 200, "hello");
        let mut m = manager(&t);

        assert_eq!(m.load_text_file("/a.txt", true, false).await.unwrap(), "hello");
        assert_eq!(m.load_text_file("/a.txt", true, false).await.unwrap(), "hello");
        assert_eq!(t.request_count(), 1);
    }

    #[tokio::test]
    async fn force_reload_issues_a_second_request() {
        let t = FakeTransport::default().with("http://game.test/a.txt", 200, "hello");
        let mut m = manager(&t);

        m.load_text_file("/a.txt", true, false).await.unwrap();
        m.load_text_file("/a.txt", true, false).await.unwrap();
        m.load_text_file("/a.txt", true, true).await.unwrap();
        assert_eq!(t.request_count(), 2);
    }

    #[tokio::test]
    async fn uncached_loads_always_hit_the_network() {
        let t = FakeTransport::default().with("http://game.test/a.txt", 200, "hello");
        let mut m = manager(&t);

        m.load_text_file("/a.txt", false, false).await.unwrap();
        m.load_text_file("/a.txt", false, false).await.unwrap();
        assert_eq!(t.request_count(), 2);
        assert_eq!(m.cached_entries(), 0);
    }

    #[tokio::test]
    async fn text_and_json_keys_do_not_collide() {
        let t = FakeTransport::default().with("http://game.test/data", 200, "{\"a\": 1}");
        let mut m = manager(&t);

        m.load_text_file("/data", true, false).await.unwrap();
        m.load_json_file("/data", true, false).await.unwrap();
        // Same URL, two kinds: two entries, two requests.
        assert_eq!(t.request_count(), 2);
        assert_eq!(m.cached_entries(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let t = FakeTransport::default().with("http://game.test/missing.txt", 404, "not found");
        let mut m = manager(&t);

        assert!(m.load_text_file("/missing.txt", true, false).await.is_err());
        assert_eq!(m.cached_entries(), 0);
        assert!(m.load_text_file("/missing.txt", true, false).await.is_err());
        assert_eq!(t.request_count(), 2);
    }

    // ── failure taxonomy ──────────────────────────────────────────────────

    #[tokio::test]
    async fn non_2xx_rejects_with_status_and_url() {
        let t = FakeTransport::default().with("http://game.test/secret.txt", 403, "");
        let mut m = manager(&t);

        match m.load_text_file("/secret.txt", false, false).await {
            Err(LoadError::Status { status, url }) => {
                assert_eq!(status, 403);
                assert_eq!(url, "http://game.test/secret.txt");
            }
            other => panic!("expected status rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let t = FakeTransport::default();
        let mut m = manager(&t);

        match m.load_text_file("/a.txt", false, false).await {
            Err(LoadError::Transport(_)) => {}
            other => panic!("expected transport rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scalar_json_body_is_a_type_mismatch() {
        let t = FakeTransport::default().with("http://game.test/n.json", 200, "42");
        let mut m = manager(&t);

        match m.load_json_file("/n.json", false, false).await {
            Err(LoadError::UnexpectedType { url }) => {
                assert_eq!(url, "http://game.test/n.json");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_parse_error() {
        let t = FakeTransport::default().with("http://game.test/bad.json", 200, "{oops");
        let mut m = manager(&t);

        assert!(matches!(
            m.load_json_file("/bad.json", false, false).await,
            Err(LoadError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn json_object_and_array_bodies_load() {
        let t = FakeTransport::default()
            .with("http://game.test/o.json", 200, "{\"w\": 2}")
            .with("http://game.test/a.json", 200, "[1, 2]");
        let mut m = manager(&t);

        let object = m.load_json_file("/o.json", false, false).await.unwrap();
        assert_eq!(object["w"], 2);
        let array = m.load_json_file("/a.json", false, false).await.unwrap();
        assert_eq!(array[1], 2);
    }

    #[tokio::test]
    async fn non_utf8_text_body_is_rejected() {
        let t = FakeTransport::default().with_raw("http://game.test/bin", 200, vec![0xff, 0xfe, 0x00]);
        let mut m = manager(&t);

        assert!(matches!(
            m.load_text_file("/bin", false, false).await,
            Err(LoadError::NotText { .. })
        ));
    }

    // ── URL resolution ────────────────────────────────────────────────────

    #[tokio::test]
    async fn relative_urls_resolve_against_the_origin() {
        let t = FakeTransport::default().with("http://game.test/shaders/basic.wgsl", 200, "src");
        let mut m = manager(&t);

        assert_eq!(
            m.load_text_file("shaders/basic.wgsl", false, false).await.unwrap(),
            "src"
        );
    }

    #[tokio::test]
    async fn absolute_urls_bypass_the_origin() {
        let t = FakeTransport::default().with("http://cdn.test/a.txt", 200, "cdn");
        let mut m = manager(&t);

        assert_eq!(
            m.load_text_file("http://cdn.test/a.txt", false, false).await.unwrap(),
            "cdn"
        );
    }

    #[test]
    fn invalid_origin_is_a_configuration_error() {
        let t = FakeTransport::default();
        assert!(matches!(
            ResourceManager::with_transport("not a url", CacheConfig::default(), &t),
            Err(LoadError::Url { .. })
        ));
    }
}

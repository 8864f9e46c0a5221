use std::future::Future;

use super::error::TransportError;

/// Raw response surfaced by a transport: status line + body bytes.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP seam used by the resource manager.
///
/// One operation: GET an absolute URL, yield status + body. Implementations
/// must not interpret the status — range checks and body decoding belong to
/// the manager.
pub trait Transport {
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport.
///
/// The client is cheap to clone and pools connections internally; one
/// transport per resource manager is the expected shape.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

use thiserror::Error;

/// Network-level failure below the HTTP status line.
///
/// The underlying transport error is propagated untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Failure raised by a non-HTTP transport (used by test doubles).
    #[error("{0}")]
    Other(String),
}

/// Failure of a resource load.
///
/// Every variant carries enough context to act on — status codes and URLs,
/// never a bare message.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered outside the 2xx range.
    #[error("GET {url} returned HTTP status {status}")]
    Status { status: u16, url: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The URL could not be resolved against the loader's origin.
    #[error("cannot resolve '{url}': {reason}")]
    Url { url: String, reason: String },

    /// A text load produced a body that is not UTF-8.
    #[error("response body for {url} is not valid UTF-8 text")]
    NotText { url: String },

    /// A JSON load produced a body that failed to parse.
    #[error("response body for {url} is not valid JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON load parsed, but to a scalar instead of an object or array.
    #[error("response body for {url} is not a JSON object or array")]
    UnexpectedType { url: String },
}

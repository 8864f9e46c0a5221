//! Asset loading over HTTP with optional caching.
//!
//! [`ResourceManager`] is an instance owned by the host application — there
//! is no process-wide cache. The HTTP side sits behind the [`Transport`]
//! trait so the cache and error semantics are testable without a network;
//! [`HttpTransport`] is the `reqwest`-backed implementation.

mod cache;
mod error;
mod manager;
mod transport;

pub use cache::CacheConfig;
pub use error::{LoadError, TransportError};
pub use manager::ResourceManager;
pub use transport::{HttpTransport, Transport, TransportResponse};

//! fetchline — minimal blocking HTTP/1.1 client engine.
//!
//! fetchline resolves a URL, opens or reuses a persistent connection to
//! the target host, issues a GET request, and incrementally parses the
//! HTTP/1.1 response according to the framing the server chose (chunked,
//! content-length, or close-delimited). Redirects are followed
//! transparently with a bounded iterative loop.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetchline::{HttpClient, Url};
//!
//! fn main() -> Result<(), fetchline::HttpError> {
//!     let mut client = HttpClient::new();
//!     let page = client.fetch(&Url::parse("https://example.org/")?)?;
//!     println!("{} bytes from {}", page.body.len(), page.url);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`Url::parse`] decomposes the raw string (pure, no I/O). [`Pool`]
//! maps `host:port` to an open [`Transport`] (plain TCP or rustls TLS)
//! and reuses it across fetches. [`read_response`] runs the HTTP/1.1
//! response state machine (status line, headers, body framing) over the
//! connection's buffered stream. [`HttpClient`] composes the three and
//! drives the redirect loop.
//!
//! Everything is single-threaded and blocking: each fetch blocks the
//! calling thread on connect, write, and read, bounded by the configured
//! timeouts. One client owns one connection cache; callers wanting
//! concurrency run one client per thread.
//!
//! file and data URLs parse (so a dispatcher can route on
//! [`Scheme`]), but fetching them is outside this crate.

pub mod client;
pub mod config;
pub mod conn;
pub mod error;
pub mod pool;
pub mod response;
pub mod transport;
pub mod url;

// ── Re-exports ──────────────────────────────────────────────────────────

/// Blocking HTTP client with keep-alive connection caching.
pub use client::HttpClient;
/// Final body plus terminal URL from one fetch.
pub use client::Page;
/// Client configuration (timeouts, limits, user agent).
pub use config::ClientConfig;
/// One open HTTP/1.1 connection.
pub use conn::Conn;
/// Errors produced by the HTTP client.
pub use error::HttpError;
/// Per-host:port keep-alive connection cache.
pub use pool::Pool;
/// Incremental HTTP/1.1 response reader.
pub use response::read_response;
/// Case-insensitive response header map.
pub use response::Headers;
/// A fully received HTTP response.
pub use response::Response;
/// Plain or TLS byte stream.
pub use transport::Transport;
/// Parsed URL record.
pub use url::Url;
/// Supported URL schemes.
pub use url::Scheme;

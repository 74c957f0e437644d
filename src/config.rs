//! Client configuration.

/// Configuration for an [`HttpClient`](crate::HttpClient).
///
/// Timeouts are in milliseconds; 0 means no timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
    /// TCP connect timeout in milliseconds. 0 means no timeout.
    pub connect_timeout_ms: u64,
    /// Timeout for each blocking receive in milliseconds. 0 means no
    /// timeout; a hung server then blocks the calling thread forever.
    pub read_timeout_ms: u64,
    /// Maximum number of redirects followed by one fetch before
    /// [`TooManyRedirects`](crate::HttpError::TooManyRedirects).
    pub max_redirects: usize,
    /// Maximum length in bytes of a single response line (status line,
    /// header line, chunk size line). Longer lines fail the parse.
    pub max_line_bytes: usize,
    /// Maximum total size in bytes of the response header block.
    pub max_header_bytes: usize,
    /// Enable TCP_NODELAY on outbound connections.
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            user_agent: concat!("fetchline/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_ms: 10_000,
            read_timeout_ms: 30_000,
            max_redirects: 10,
            max_line_bytes: 8 * 1024,
            max_header_bytes: 64 * 1024,
            tcp_nodelay: true,
        }
    }
}

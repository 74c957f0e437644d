use std::io;

/// Errors produced by the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The URL scheme is absent or not one of http/https/file/data.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// The URL is structurally invalid (bad port, empty host).
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// DNS resolution, TCP connect, or TLS handshake failed.
    #[error("connect failed: {0}")]
    Connect(String),

    /// TLS configuration or session error.
    #[error("tls error: {0}")]
    Tls(#[from] rustls::Error),

    /// The connection was closed before a complete response was received.
    #[error("connection closed")]
    ConnectionClosed,

    /// A blocking read exceeded the configured deadline.
    #[error("timeout")]
    Timeout,

    /// The status line or header block violates the response grammar.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The server used a content or transfer encoding this client does
    /// not decode.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Neither transfer-encoding nor content-length on a keep-alive
    /// response; the body length is ambiguous.
    #[error("missing body framing")]
    MissingFraming,

    /// The redirect chain exceeded the configured limit.
    #[error("too many redirects (limit {0})")]
    TooManyRedirects(usize),

    /// I/O error.
    #[error("io error: {0}")]
    Io(io::Error),
}

// Classify instead of wrapping blindly: a read deadline and a clean close
// must surface as distinct kinds no matter where the `?` sits.
impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => HttpError::Timeout,
            io::ErrorKind::UnexpectedEof => HttpError::ConnectionClosed,
            _ => HttpError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_kinds_map_to_timeout() {
        let e: HttpError = io::Error::new(io::ErrorKind::TimedOut, "t").into();
        assert!(matches!(e, HttpError::Timeout));
        let e: HttpError = io::Error::new(io::ErrorKind::WouldBlock, "w").into();
        assert!(matches!(e, HttpError::Timeout));
    }

    #[test]
    fn eof_maps_to_connection_closed() {
        let e: HttpError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(e, HttpError::ConnectionClosed));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let e: HttpError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(e, HttpError::Io(_)));
    }
}

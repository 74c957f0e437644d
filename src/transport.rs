//! Byte transport: plain TCP or TLS over TCP.
//!
//! A [`Transport`] is the bidirectional stream one connection reads and
//! writes. TLS uses rustls with the webpki root store; the handshake is
//! driven to completion at connect time so certificate and protocol
//! failures surface as [`HttpError::Connect`] rather than as I/O errors
//! in the middle of a response parse.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::ServerName;
use rustls::{ClientConnection, StreamOwned};

use crate::config::ClientConfig;
use crate::error::HttpError;

/// A connected byte stream, plain or TLS-wrapped.
#[derive(Debug)]
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Transport {
    /// Open a transport to `host:port`, TLS-wrapped when `tls` is given.
    ///
    /// Resolves the host and tries each address with the configured
    /// connect timeout. The server hostname is used for certificate
    /// verification.
    pub fn connect(
        host: &str,
        port: u16,
        tls: Option<Arc<rustls::ClientConfig>>,
        config: &ClientConfig,
    ) -> Result<Transport, HttpError> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| HttpError::Connect(format!("resolve {host}:{port}: {e}")))?;

        let connect_timeout = duration_ms(config.connect_timeout_ms);
        let mut stream = None;
        let mut last_err = None;
        for addr in addrs {
            let attempt = match connect_timeout {
                Some(t) => TcpStream::connect_timeout(&addr, t),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }
        let stream = match (stream, last_err) {
            (Some(s), _) => s,
            (None, Some(e)) => {
                return Err(HttpError::Connect(format!("connect {host}:{port}: {e}")))
            }
            (None, None) => {
                return Err(HttpError::Connect(format!("resolve {host}:{port}: no addresses")))
            }
        };

        stream
            .set_read_timeout(duration_ms(config.read_timeout_ms))
            .map_err(HttpError::Io)?;
        if config.tcp_nodelay {
            stream.set_nodelay(true).map_err(HttpError::Io)?;
        }

        match tls {
            Some(tls_config) => {
                let name = ServerName::try_from(host.to_string())
                    .map_err(|e| HttpError::Connect(format!("invalid server name {host}: {e}")))?;
                let mut conn = ClientConnection::new(tls_config, name)?;
                let mut stream = stream;
                while conn.is_handshaking() {
                    conn.complete_io(&mut stream)
                        .map_err(|e| HttpError::Connect(format!("tls handshake {host}: {e}")))?;
                }
                Ok(Transport::Tls(Box::new(StreamOwned::new(conn, stream))))
            }
            None => Ok(Transport::Plain(stream)),
        }
    }
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}

/// TLS client configuration with the webpki root store and no client auth.
///
/// Built once per pool and shared across connections.
pub fn default_tls_config() -> Arc<rustls::ClientConfig> {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    Arc::new(
        rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}

fn duration_ms(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_refused_is_connect_error() {
        // Bind-then-drop guarantees nothing is listening on the port.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = ClientConfig {
            connect_timeout_ms: 1_000,
            ..ClientConfig::default()
        };
        let err = Transport::connect("127.0.0.1", port, None, &config).unwrap_err();
        assert!(matches!(err, HttpError::Connect(_)));
    }

    #[test]
    fn unresolvable_host_is_connect_error() {
        let config = ClientConfig::default();
        let err = Transport::connect("nonexistent.invalid", 80, None, &config).unwrap_err();
        assert!(matches!(err, HttpError::Connect(_)));
    }
}

//! A single HTTP/1.1 connection.
//!
//! One [`Conn`] is one request-response exchange at a time on one
//! transport; no pipelining. The buffered reader lives with the
//! connection so bytes buffered past one response stay available to the
//! next exchange on the same connection.

use std::io::{BufReader, Write};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::response::{read_response, Response};
use crate::transport::Transport;
use crate::url::Scheme;

/// An open HTTP/1.1 connection to one host:port.
pub struct Conn {
    stream: BufReader<Transport>,
    host: String,
    port: u16,
}

impl Conn {
    /// Open a connection for the given scheme, TLS-wrapped for https.
    pub(crate) fn open(
        host: &str,
        port: u16,
        scheme: Scheme,
        tls: &Arc<rustls::ClientConfig>,
        config: &ClientConfig,
    ) -> Result<Conn, HttpError> {
        let tls = match scheme {
            Scheme::Https => Some(Arc::clone(tls)),
            _ => None,
        };
        let transport = Transport::connect(host, port, tls, config)?;
        Ok(Conn {
            stream: BufReader::new(transport),
            host: host.to_string(),
            port,
        })
    }

    /// The `host:port` cache key this connection belongs to.
    pub fn key(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Serialize and send a GET request for `path`.
    pub fn send_request(&mut self, path: &str, user_agent: &str) -> Result<(), HttpError> {
        let mut req = Vec::with_capacity(256);
        req.extend_from_slice(b"GET ");
        req.extend_from_slice(path.as_bytes());
        req.extend_from_slice(b" HTTP/1.1\r\n");
        req.extend_from_slice(b"Host: ");
        req.extend_from_slice(self.host.as_bytes());
        req.extend_from_slice(b"\r\n");
        req.extend_from_slice(b"User-Agent: ");
        req.extend_from_slice(user_agent.as_bytes());
        req.extend_from_slice(b"\r\n");
        req.extend_from_slice(b"Connection: keep-alive\r\n");
        req.extend_from_slice(b"\r\n");

        let transport = self.stream.get_mut();
        transport.write_all(&req)?;
        transport.flush()?;
        Ok(())
    }

    /// Read one response off this connection.
    pub fn read_response(&mut self, config: &ClientConfig) -> Result<Response, HttpError> {
        read_response(&mut self.stream, config)
    }
}

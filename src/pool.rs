//! Per-host connection cache.
//!
//! `Pool` owns at most one idle connection per `host:port` key and hands
//! it out for one exchange at a time. It is single-threaded (no Arc, no
//! Mutex): one pool belongs to exactly one client, never shared across
//! threads. Connections are opened lazily on first use and kept alive
//! across fetches to the same key.
//!
//! There are no health checks on idle connections: a dead cached
//! connection is discovered by the next send or read failing, and because
//! an acquired connection only re-enters the cache through
//! [`release()`](Pool::release), an error path evicts it automatically.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::config::ClientConfig;
use crate::conn::Conn;
use crate::error::HttpError;
use crate::transport::default_tls_config;
use crate::url::Url;

/// A keep-alive connection cache keyed by `host:port`.
pub struct Pool {
    conns: HashMap<String, Conn>,
    tls: Arc<rustls::ClientConfig>,
}

impl Pool {
    /// Create an empty pool with the default TLS configuration.
    pub fn new() -> Pool {
        Pool {
            conns: HashMap::new(),
            tls: default_tls_config(),
        }
    }

    /// Get a connection for the URL's host:port, reusing the cached one
    /// when present, opening a new one otherwise.
    ///
    /// The connection is removed from the cache while in use; give it
    /// back with [`release()`](Pool::release) once the exchange is done.
    pub fn acquire(&mut self, url: &Url, config: &ClientConfig) -> Result<Conn, HttpError> {
        let key = format!("{}:{}", url.host, url.port);
        if let Some(conn) = self.conns.remove(&key) {
            debug!("reusing connection {key}");
            return Ok(conn);
        }
        debug!("connecting {key}");
        Conn::open(&url.host, url.port, url.scheme, &self.tls, config)
    }

    /// Return an idle connection to the cache for later reuse.
    pub fn release(&mut self, conn: Conn) {
        self.conns.insert(conn.key(), conn);
    }

    /// Explicitly close the cached connection for `key`, if any.
    /// Returns true if a connection was evicted.
    pub fn close(&mut self, key: &str) -> bool {
        let evicted = self.conns.remove(key).is_some();
        if evicted {
            debug!("evicting connection {key}");
        }
        evicted
    }

    /// Close every cached connection.
    pub fn close_all(&mut self) {
        self.conns.clear();
    }

    /// Number of idle cached connections.
    pub fn connected_count(&self) -> usize {
        self.conns.len()
    }

    /// True if an idle connection is cached for `key`.
    pub fn is_cached(&self, key: &str) -> bool {
        self.conns.contains_key(key)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Pool::new()
    }
}

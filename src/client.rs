//! Top-level HTTP client: request orchestration and redirect following.

use log::debug;

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::pool::Pool;
use crate::url::Url;

/// The result of a completed fetch: the final body plus the URL it was
/// actually served from (after redirects), which the caller needs to
/// decide view-source vs. rendered display.
#[derive(Debug)]
pub struct Page {
    /// Body decoded as UTF-8 with replacement.
    pub body: String,
    /// Terminal URL after redirect following.
    pub url: Url,
}

/// Blocking HTTP/1.1 client with a per-host keep-alive connection cache.
///
/// One client is one logical browser context: it owns its own [`Pool`]
/// (never process-global state) and must not be shared across threads
/// without external synchronization.
///
/// # Example
///
/// ```rust,no_run
/// use fetchline::{HttpClient, Url};
///
/// fn main() -> Result<(), fetchline::HttpError> {
///     let mut client = HttpClient::new();
///     let url = Url::parse("http://example.org/index.html")?;
///     let page = client.fetch(&url)?;
///     println!("{}", page.body);
///     Ok(())
/// }
/// ```
pub struct HttpClient {
    config: ClientConfig,
    pool: Pool,
}

impl HttpClient {
    /// Create a client with the default configuration.
    pub fn new() -> HttpClient {
        HttpClient::with_config(ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(config: ClientConfig) -> HttpClient {
        HttpClient {
            config,
            pool: Pool::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The connection cache, for inspection.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Fetch `url` with GET, following 301/302 redirects, and return the
    /// final body plus the terminal URL.
    ///
    /// Only http and https URLs are fetched here; file and data URLs are
    /// the dispatcher's job and fail with
    /// [`UnsupportedScheme`](HttpError::UnsupportedScheme).
    ///
    /// Connections are kept alive and cached per host:port across calls.
    /// Errors are not retried: a failed exchange drops its connection (so
    /// a later fetch reconnects) and the error propagates to the caller.
    pub fn fetch(&mut self, url: &Url) -> Result<Page, HttpError> {
        if !url.scheme.is_network() {
            return Err(HttpError::UnsupportedScheme(url.scheme.to_string()));
        }

        let mut current = url.clone();
        let mut redirects = 0usize;
        loop {
            // An error anywhere in the exchange drops `conn` without
            // releasing it, so the failed connection never re-enters the
            // cache.
            let mut conn = self.pool.acquire(&current, &self.config)?;
            conn.send_request(&current.path, &self.config.user_agent)?;
            let resp = conn.read_response(&self.config)?;

            if resp.will_close() {
                debug!("server closing {}", conn.key());
            } else {
                self.pool.release(conn);
            }

            if resp.is_redirect() {
                if redirects >= self.config.max_redirects {
                    return Err(HttpError::TooManyRedirects(self.config.max_redirects));
                }
                let location = resp.header("location").ok_or_else(|| {
                    HttpError::MalformedResponse(format!(
                        "{} response without location",
                        resp.status()
                    ))
                })?;
                let next = current.resolve(location)?;
                debug!("redirect {} {} -> {next}", resp.status(), current);
                redirects += 1;
                current = next;
                continue;
            }

            debug!("fetched {current}: {} {}", resp.status(), resp.reason());
            return Ok(Page {
                body: resp.text(),
                url: current,
            });
        }
    }

    /// Close every cached connection.
    pub fn close_all(&mut self) {
        self.pool.close_all();
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        HttpClient::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::Scheme;

    #[test]
    fn fetch_refuses_non_network_schemes() {
        let mut client = HttpClient::new();
        let url = Url::parse("data:text/html,hi").unwrap();
        assert_eq!(url.scheme, Scheme::Data);
        assert!(matches!(
            client.fetch(&url),
            Err(HttpError::UnsupportedScheme(_))
        ));

        let url = Url::parse("file:///tmp/x.html").unwrap();
        assert!(matches!(
            client.fetch(&url),
            Err(HttpError::UnsupportedScheme(_))
        ));
    }
}

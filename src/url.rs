//! URL decomposition.
//!
//! [`Url::parse`] splits a raw URL string into scheme, host, port, and
//! path without any network I/O. Only the schemes the engine knows how to
//! route are accepted; anything else fails up front rather than deep in
//! the connect path.

use std::fmt;

use crate::error::HttpError;

/// Supported URL schemes.
///
/// `view-source:` is not a scheme of its own; it is a display flag
/// layered on top of one of these (see [`Url::view_source`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    File,
    Data,
}

impl Scheme {
    /// Default port for network schemes; 0 for file/data.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
            Scheme::File | Scheme::Data => 0,
        }
    }

    /// True for schemes fetched over a socket (http/https).
    pub fn is_network(self) -> bool {
        matches!(self, Scheme::Http | Scheme::Https)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::File => "file",
            Scheme::Data => "data",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed URL.
///
/// Immutable by convention: a redirect produces a new `Url` via
/// [`Url::resolve`], never an in-place edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub scheme: Scheme,
    /// Host name; empty for file/data URLs.
    pub host: String,
    /// Port, defaulted from the scheme when not explicit; 0 for file/data.
    pub port: u16,
    /// Request path. Always starts with `/` for http/https; holds the
    /// post-marker remainder verbatim for file URLs.
    pub path: String,
    /// The URL was prefixed `view-source:`; the caller should display
    /// the raw body instead of rendering it.
    pub view_source: bool,
    /// Everything after the `data:` marker, verbatim. Empty for other
    /// schemes.
    pub raw_payload: String,
}

impl Url {
    /// Parse a raw URL string.
    ///
    /// Fails with [`HttpError::UnsupportedScheme`] when the scheme is
    /// absent or unknown (there is no implicit default scheme) and with
    /// [`HttpError::InvalidUrl`] when the authority part is malformed.
    pub fn parse(raw: &str) -> Result<Url, HttpError> {
        let (view_source, rest) = match raw.strip_prefix("view-source:") {
            Some(inner) => (true, inner),
            None => (false, raw),
        };

        if let Some(payload) = rest.strip_prefix("data:") {
            return Ok(Url {
                scheme: Scheme::Data,
                host: String::new(),
                port: 0,
                path: String::new(),
                view_source,
                raw_payload: payload.to_string(),
            });
        }

        if let Some(after) = rest.strip_prefix("file:") {
            // Accept both `file:///path` and bare `file:/path`.
            let path = after.strip_prefix("//").unwrap_or(after);
            return Ok(Url {
                scheme: Scheme::File,
                host: String::new(),
                port: 0,
                path: path.to_string(),
                view_source,
                raw_payload: String::new(),
            });
        }

        let (scheme_str, after) = rest
            .split_once("://")
            .ok_or_else(|| HttpError::UnsupportedScheme(raw.to_string()))?;
        let scheme = match scheme_str {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(HttpError::UnsupportedScheme(other.to_string())),
        };

        // Everything up to the first `/` is the authority; no `/` means
        // the path is just `/`.
        let (authority, path) = match after.find('/') {
            Some(idx) => (&after[..idx], &after[idx..]),
            None => (after, "/"),
        };

        let (host, port) = match authority.split_once(':') {
            Some((h, p)) => {
                let port: u16 = p
                    .parse()
                    .map_err(|_| HttpError::InvalidUrl(format!("bad port in {raw}")))?;
                (h, port)
            }
            None => (authority, scheme.default_port()),
        };
        if host.is_empty() {
            return Err(HttpError::InvalidUrl(format!("empty host in {raw}")));
        }

        Ok(Url {
            scheme,
            host: host.to_string(),
            port,
            path: path.to_string(),
            view_source,
            raw_payload: String::new(),
        })
    }

    /// Resolve a redirect `Location` value against this URL.
    ///
    /// A leading `/` keeps this URL's scheme, host, and port; anything
    /// else is treated as an absolute URL. Full relative-reference
    /// resolution is deliberately not implemented. The view-source flag
    /// carries over: a redirect does not change the display intent.
    pub fn resolve(&self, location: &str) -> Result<Url, HttpError> {
        if location.starts_with('/') {
            let mut next = self.clone();
            next.path = location.to_string();
            Ok(next)
        } else {
            let mut next = Url::parse(location)?;
            next.view_source = self.view_source;
            Ok(next)
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.view_source {
            f.write_str("view-source:")?;
        }
        match self.scheme {
            Scheme::Data => write!(f, "data:{}", self.raw_payload),
            Scheme::File => write!(f, "file:{}", self.path),
            scheme => {
                write!(f, "{scheme}://{}", self.host)?;
                if self.port != scheme.default_port() {
                    write!(f, ":{}", self.port)?;
                }
                f.write_str(&self.path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_default_port_and_path() {
        let url = Url::parse("http://a.com").unwrap();
        assert_eq!(url.scheme, Scheme::Http);
        assert_eq!(url.host, "a.com");
        assert_eq!(url.port, 80);
        assert_eq!(url.path, "/");
    }

    #[test]
    fn https_default_port() {
        let url = Url::parse("https://a.com/x").unwrap();
        assert_eq!(url.port, 443);
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn explicit_port() {
        let url = Url::parse("http://a.com:8080/x").unwrap();
        assert_eq!(url.host, "a.com");
        assert_eq!(url.port, 8080);
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn path_keeps_query_like_remainder() {
        let url = Url::parse("http://a.com/x/y?z=1").unwrap();
        assert_eq!(url.path, "/x/y?z=1");
    }

    #[test]
    fn unsupported_scheme_fails() {
        assert!(matches!(
            Url::parse("ftp://x"),
            Err(HttpError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn missing_scheme_fails() {
        assert!(matches!(
            Url::parse("example.com/index.html"),
            Err(HttpError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn bad_port_fails() {
        assert!(matches!(
            Url::parse("http://a.com:notaport/"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn empty_host_fails() {
        assert!(matches!(
            Url::parse("http:///x"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn view_source_flag() {
        let url = Url::parse("view-source:http://a.com/x").unwrap();
        assert!(url.view_source);
        assert_eq!(url.scheme, Scheme::Http);
        assert_eq!(url.host, "a.com");
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn data_url_keeps_payload_verbatim() {
        let url = Url::parse("data:text/html,Hello <b>world</b>").unwrap();
        assert_eq!(url.scheme, Scheme::Data);
        assert_eq!(url.raw_payload, "text/html,Hello <b>world</b>");
        assert!(url.host.is_empty());
        assert_eq!(url.port, 0);
    }

    #[test]
    fn file_url_strips_scheme_marker() {
        let url = Url::parse("file:///tmp/test.html").unwrap();
        assert_eq!(url.scheme, Scheme::File);
        assert_eq!(url.path, "/tmp/test.html");
        assert!(url.host.is_empty());
    }

    #[test]
    fn resolve_absolute_path() {
        let base = Url::parse("http://a.com:8080/old").unwrap();
        let next = base.resolve("/new").unwrap();
        assert_eq!(next.host, "a.com");
        assert_eq!(next.port, 8080);
        assert_eq!(next.path, "/new");
    }

    #[test]
    fn resolve_absolute_url() {
        let base = Url::parse("http://a.com/old").unwrap();
        let next = base.resolve("https://b.com/new").unwrap();
        assert_eq!(next.scheme, Scheme::Https);
        assert_eq!(next.host, "b.com");
        assert_eq!(next.port, 443);
        assert_eq!(next.path, "/new");
    }

    #[test]
    fn resolve_carries_view_source() {
        let base = Url::parse("view-source:http://a.com/old").unwrap();
        assert!(base.resolve("/new").unwrap().view_source);
        assert!(base.resolve("http://b.com/new").unwrap().view_source);
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(
            Url::parse("http://a.com:8080/x").unwrap().to_string(),
            "http://a.com:8080/x"
        );
        assert_eq!(Url::parse("http://a.com").unwrap().to_string(), "http://a.com/");
        assert_eq!(
            Url::parse("view-source:https://a.com/x").unwrap().to_string(),
            "view-source:https://a.com/x"
        );
    }
}

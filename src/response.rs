//! HTTP/1.1 response parsing.
//!
//! [`read_response`] drives one response off a buffered stream: status
//! line, header block, then the body under whichever framing the server
//! chose (chunked, content-length, or close-delimited). The reader never
//! guesses: a keep-alive response with neither framing header has an
//! ambiguous body length and fails instead of reading to EOF.
//!
//! Every line read is length-bounded and the header block as a whole is
//! size-capped, so a server that never sends CRLF cannot grow memory
//! without bound.

use std::io::{BufRead, Read};

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::HttpError;

/// Response header map.
///
/// Names are stored lowercase; lookups are case-insensitive. Insertion
/// order is preserved and a repeated name overwrites the earlier value in
/// place (last seen wins).
#[derive(Debug, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Look up a header value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }
}

/// A fully received HTTP response.
#[derive(Debug)]
pub struct Response {
    version: String,
    status: u16,
    reason: String,
    headers: Headers,
    body: Bytes,
}

impl Response {
    /// HTTP version from the status line (e.g. `HTTP/1.1`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// HTTP status code (e.g. 200, 404).
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase, embedded spaces preserved. May be empty.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Shorthand for `headers().get(name)`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Body bytes, exactly as framed by the server.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True for the redirect statuses this client follows.
    pub fn is_redirect(&self) -> bool {
        self.status == 301 || self.status == 302
    }

    /// True when the server will close the connection after this
    /// response, making it unusable for another exchange.
    pub fn will_close(&self) -> bool {
        connection_close(&self.version, &self.headers)
    }
}

fn connection_close(version: &str, headers: &Headers) -> bool {
    match headers.get("connection") {
        Some(v) if v.eq_ignore_ascii_case("close") => true,
        Some(v) if v.eq_ignore_ascii_case("keep-alive") => false,
        _ => version == "HTTP/1.0",
    }
}

/// Read one HTTP/1.1 response from a buffered stream.
///
/// On success the body contains exactly the bytes described by the
/// framing the server chose: never truncated, never over-read past the
/// end of this response.
pub fn read_response<R: BufRead>(r: &mut R, config: &ClientConfig) -> Result<Response, HttpError> {
    // Status line: version SP status SP reason, reason keeps its spaces.
    let status_line = read_line(r, config.max_line_bytes)?;
    let mut parts = status_line.splitn(3, ' ');
    let version = parts
        .next()
        .filter(|v| v.starts_with("HTTP/"))
        .ok_or_else(|| HttpError::MalformedResponse(format!("bad status line: {status_line:?}")))?
        .to_string();
    let status: u16 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| HttpError::MalformedResponse(format!("bad status line: {status_line:?}")))?;
    let reason = parts.next().unwrap_or("").to_string();

    // Header block: lowercase names, trimmed values, empty line ends it.
    let mut headers = Headers::default();
    let mut header_bytes = 0usize;
    loop {
        let line = read_line(r, config.max_line_bytes)?;
        if line.is_empty() {
            break;
        }
        header_bytes += line.len() + 2;
        if header_bytes > config.max_header_bytes {
            return Err(HttpError::MalformedResponse("header block too large".to_string()));
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::MalformedResponse(format!("header without colon: {line:?}")))?;
        headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
    }

    if let Some(enc) = headers.get("content-encoding") {
        return Err(HttpError::UnsupportedEncoding(enc.to_string()));
    }

    // Framing priority: transfer-encoding, then content-length, then
    // close-delimited. A keep-alive response with none of these has an
    // ambiguous body length.
    let body = if let Some(te) = headers.get("transfer-encoding") {
        if !te.eq_ignore_ascii_case("chunked") {
            return Err(HttpError::UnsupportedEncoding(te.to_string()));
        }
        read_chunked(r, config)?
    } else if let Some(cl) = headers.get("content-length") {
        let len: usize = cl
            .parse()
            .map_err(|_| HttpError::MalformedResponse(format!("bad content-length: {cl:?}")))?;
        let mut body = Vec::new();
        read_exact_into(r, len, &mut body)?;
        body
    } else if connection_close(&version, &headers) {
        let mut body = Vec::new();
        r.read_to_end(&mut body)?;
        body
    } else {
        return Err(HttpError::MissingFraming);
    };

    Ok(Response {
        version,
        status,
        reason,
        headers,
        body: Bytes::from(body),
    })
}

/// Chunked transfer decoding: hex-sized chunks until a zero-size
/// terminator. Chunk extensions are ignored; trailer lines are drained
/// (not parsed) through the final empty line so the connection stays
/// positioned at the next response.
fn read_chunked<R: BufRead>(r: &mut R, config: &ClientConfig) -> Result<Vec<u8>, HttpError> {
    let mut body = Vec::new();
    loop {
        let line = read_line(r, config.max_line_bytes)?;
        let size_hex = line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| HttpError::MalformedResponse(format!("bad chunk size: {line:?}")))?;
        if size == 0 {
            break;
        }
        read_exact_into(r, size, &mut body)?;
        let sep = read_line(r, config.max_line_bytes)?;
        if !sep.is_empty() {
            return Err(HttpError::MalformedResponse("missing CRLF after chunk".to_string()));
        }
    }

    let mut trailer_bytes = 0usize;
    loop {
        let line = read_line(r, config.max_line_bytes)?;
        if line.is_empty() {
            break;
        }
        trailer_bytes += line.len() + 2;
        if trailer_bytes > config.max_header_bytes {
            return Err(HttpError::MalformedResponse("trailer block too large".to_string()));
        }
    }
    Ok(body)
}

/// Read one CRLF-terminated line, without the terminator, capped at `max`
/// bytes. EOF before any byte or mid-line is a closed connection.
fn read_line<R: BufRead>(r: &mut R, max: usize) -> Result<String, HttpError> {
    let mut buf = Vec::with_capacity(64);
    let n = r.take(max as u64).read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Err(HttpError::ConnectionClosed);
    }
    if buf.last() != Some(&b'\n') {
        if n >= max {
            return Err(HttpError::MalformedResponse("line too long".to_string()));
        }
        return Err(HttpError::ConnectionClosed);
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Append exactly `len` bytes from the stream to `out`.
fn read_exact_into<R: BufRead>(r: &mut R, len: usize, out: &mut Vec<u8>) -> Result<(), HttpError> {
    let n = r.take(len as u64).read_to_end(out)?;
    if n < len {
        return Err(HttpError::ConnectionClosed);
    }
    Ok(())
}

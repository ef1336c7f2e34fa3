//! HTTP request parsing and representation.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::parser::error::Error;
use crate::parser::method::Method;

/// Header whose value is captured into [`HttpRequest::user_agent`].
const USER_AGENT: &str = "User-Agent:";

/// Represents an HTTP request.
///
/// Only the pieces the server routes on are kept: the method, the URI, the
/// `User-Agent` header and a single line of body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, or UNKNOWN)
    pub method: Method,
    /// The request URI, `/` when no request line was found
    pub uri: String,
    /// The value of the `User-Agent` header, if one was sent
    pub user_agent: Option<String>,
    /// The first line following the blank line that ends the headers
    pub body: Option<Vec<u8>>,
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self {
            method: Method::UNKNOWN,
            uri: "/".to_string(),
            user_agent: None,
            body: None,
        }
    }
}

impl HttpRequest {
    /// Create a new HTTP request.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `uri` - The request URI
    ///
    /// # Returns
    ///
    /// A new HTTP request without a user agent or body
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Set the `User-Agent` value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// The result of reading a request off a connection.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Bytes were received and parsed into a request.
    Parsed(HttpRequest),
    /// Nothing usable could be read.
    Malformed(Error),
}

/// Read a single request from a byte stream.
///
/// Performs one read of at most `read_buffer_size` bytes. A failed read or a
/// stream that ends before any data arrives yields [`ParseOutcome::Malformed`];
/// anything else is handed to [`parse_request`].
pub async fn read_request<R>(reader: &mut R, read_buffer_size: usize) -> ParseOutcome
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0; read_buffer_size.max(1)];

    match reader.read(&mut buf).await {
        Ok(0) => ParseOutcome::Malformed(Error::EmptyRequest),
        Ok(n) => ParseOutcome::Parsed(parse_request(&buf[..n])),
        Err(e) => ParseOutcome::Malformed(Error::Io(e)),
    }
}

/// Parse an HTTP request from a byte slice.
///
/// Parsing is line based and forgiving. Lines that are neither a request line
/// nor a `User-Agent` header are ignored, so this never fails; a buffer with
/// no recognizable request line produces an `UNKNOWN` request for `/`.
///
/// # Arguments
///
/// * `input` - The raw bytes read from the connection
///
/// # Returns
///
/// The best-effort parsed request
pub fn parse_request(input: &[u8]) -> HttpRequest {
    let mut request = HttpRequest::default();
    let mut lines = input.split(|&b| b == b'\n').map(trim_cr);

    while let Some(line) = lines.next() {
        // Empty line indicates the end of headers
        if line.is_empty() {
            request.body = lines
                .next()
                .filter(|body| !body.is_empty())
                .map(<[u8]>::to_vec);
            break;
        }

        let line = String::from_utf8_lossy(line);

        if let Some((method, uri)) = parse_request_line(&line) {
            request.method = method;
            request.uri = uri.to_string();
        } else if let Some(agent) = header_value(&line, USER_AGENT) {
            request.user_agent = Some(agent.to_string());
        }
    }

    request
}

/// Split a `<METHOD> <URI> [<VERSION>]` line, skipping anything that isn't one.
fn parse_request_line(line: &str) -> Option<(Method, &str)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let method = parts[0].parse::<Method>().unwrap_or_default();
    (method != Method::UNKNOWN).then_some((method, parts[1]))
}

fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let prefix = line.get(..name.len())?;
    if !prefix.eq_ignore_ascii_case(name) {
        return None;
    }
    Some(line[name.len()..].trim_start_matches(' '))
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

//! Minimal HTTP/1.1 request parsing and response writing.
//!
//! One request per connection: every response carries `Connection: close`.
//! Responses are always JSON and always carry permissive CORS headers.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use url::Url;

const JSON_MIME: &str = "application/json";
const MAX_HEADER_LINES: usize = 100;
const MAX_LINE_BYTES: usize = 8 * 1024;

/// Errors raised while reading a request off the wire.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The peer closed the connection before sending a request line.
    #[error("connection closed before request")]
    ConnectionClosed,

    /// The request line or a header could not be parsed.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// The declared body exceeds the configured limit.
    #[error("request body of {size} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },

    /// Reading from the socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Upper-case method, e.g. "GET".
    pub method: String,
    /// Decoded path segments; `/` has none.
    pub segments: Vec<String>,
    /// Decoded query parameters. The first occurrence of a key wins.
    pub query: HashMap<String, String>,
    /// Header names lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a request target such as
    /// `/explain/c1?persona=farmer`.
    pub fn new(method: &str, target: &str) -> Result<Self, HttpError> {
        if !target.starts_with('/') {
            return Err(HttpError::Malformed(format!("unsupported target: {target}")));
        }
        let url = Url::parse(&format!("http://localhost{target}"))
            .map_err(|e| HttpError::Malformed(format!("bad target {target}: {e}")))?;

        let segments = match url.path() {
            "/" => Vec::new(),
            path => path[1..]
                .split('/')
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                .collect(),
        };

        let mut query = HashMap::new();
        for (key, value) in url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            method: method.to_ascii_uppercase(),
            segments,
            query,
            headers: HashMap::new(),
            body: Vec::new(),
        })
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The path, re-joined from its decoded segments.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// A query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Read one request: request line, headers, then a `Content-Length` body.
pub async fn read_request<R>(reader: &mut R, max_body_bytes: usize) -> Result<Request, HttpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut request_line = String::new();
    if read_line_bounded(reader, &mut request_line).await? == 0 {
        return Err(HttpError::ConnectionClosed);
    }

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(HttpError::Malformed(format!(
            "bad request line: {}",
            request_line.trim()
        )));
    };
    let mut request = Request::new(method, target)?;

    let mut content_length: usize = 0;
    let mut header_lines = 0;
    loop {
        let mut line = String::new();
        if read_line_bounded(reader, &mut line).await? == 0 || line.trim().is_empty() {
            break;
        }
        header_lines += 1;
        if header_lines > MAX_HEADER_LINES {
            return Err(HttpError::Malformed(format!(
                "more than {MAX_HEADER_LINES} header lines"
            )));
        }
        let Some((key, val)) = line.trim().split_once(':') else {
            return Err(HttpError::Malformed(format!("bad header: {}", line.trim())));
        };
        let key = key.trim().to_ascii_lowercase();
        let val = val.trim().to_string();
        if key == "content-length" {
            content_length = val
                .parse()
                .map_err(|_| HttpError::Malformed(format!("bad content-length: {val}")))?;
        }
        request.headers.insert(key, val);
    }

    if content_length > max_body_bytes {
        return Err(HttpError::BodyTooLarge {
            size: content_length,
            limit: max_body_bytes,
        });
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;
    request.body = body;

    Ok(request)
}

/// `read_line` that gives up on lines longer than `MAX_LINE_BYTES`.
async fn read_line_bounded<R>(reader: &mut R, line: &mut String) -> Result<usize, HttpError>
where
    R: AsyncBufRead + Unpin,
{
    let n = (&mut *reader)
        .take(MAX_LINE_BYTES as u64)
        .read_line(line)
        .await?;
    if n == MAX_LINE_BYTES && !line.ends_with('\n') {
        return Err(HttpError::Malformed(format!(
            "line longer than {MAX_LINE_BYTES} bytes"
        )));
    }
    Ok(n)
}

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!("failed to serialize response: {e}");
                Self::error(500, "Internal server error")
            }
        }
    }

    /// `{"status": "error", "message": ...}` with the given status code.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({"status": "error", "message": message})
                .to_string()
                .into_bytes(),
        }
    }

    /// Empty 204, used to answer CORS preflight requests.
    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: Vec::new(),
        }
    }

    /// Parse the body back into JSON.
    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }

    /// Full wire representation: status line, headers, body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Methods: GET, POST, OPTIONS\r\nAccess-Control-Allow-Headers: Content-Type, Accept\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason_phrase(self.status),
            JSON_MIME,
            self.body.len()
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

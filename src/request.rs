//! Incremental HTTP/1.x request parsing.
//!
//! First-colon header split, no folding, no chunked
//! bodies. A body is read only for `POST` with a `Content-Length`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::config::{HttpVersion, ServerConfig, DEFAULT_MAX_HEADERS};
use crate::error::{Error, Result};
use crate::response::ConnectionMode;

/// Request headers. Names compare ASCII case-insensitively; the first
/// occurrence of a name wins and later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
    // lowercased name -> position in `entries`
    index: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        match self.index.entry(name.to_ascii_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push((name, value.into()));
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let position = self.index.get(&name.to_ascii_lowercase())?;
        self.entries.get(*position).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// `Upgrade: h2c` together with a `Connection` header mentioning `upgrade`.
    pub fn wants_h2c_upgrade(&self) -> bool {
        let upgrade = self
            .header("Upgrade")
            .map(|v| v.eq_ignore_ascii_case("h2c"))
            .unwrap_or(false);
        let connection = self
            .header("Connection")
            .map(|v| v.to_ascii_lowercase().contains("upgrade"))
            .unwrap_or(false);
        upgrade && connection
    }

    /// `close` only when the client asked for it; keep-alive otherwise.
    pub fn connection_mode(&self) -> ConnectionMode {
        match self.header("Connection") {
            Some(v) if v.eq_ignore_ascii_case("close") => ConnectionMode::Close,
            _ => ConnectionMode::KeepAlive,
        }
    }
}

/// Reads one request at a time from a buffered stream.
#[derive(Debug, Clone)]
pub struct RequestParser {
    version: HttpVersion,
    max_line_length: usize,
    max_headers: usize,
    max_body_size: usize,
}

impl RequestParser {
    pub fn new(version: HttpVersion, max_line_length: usize, max_body_size: usize) -> Self {
        Self {
            version,
            max_line_length,
            max_headers: DEFAULT_MAX_HEADERS,
            max_body_size,
        }
    }

    /// Cap on header lines per request, blank terminator excluded.
    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.http_version, config.max_line_length, config.max_body_size)
            .with_max_headers(config.max_headers)
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Read the request line and headers. The body is left unread.
    pub async fn read_head<R>(&self, reader: &mut R) -> Result<Request>
    where
        R: AsyncBufRead + Unpin,
    {
        let line = self.read_line(reader).await.map_err(|e| match e {
            Error::LineTooLong { .. } => Error::MalformedRequestLine("<too long>".into()),
            other => other,
        })?;
        let (method, target, version) = self.parse_request_line(&line)?;

        let mut headers = HeaderMap::new();
        let mut lines = 0;
        loop {
            let line = self.read_line(reader).await?;
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            // Duplicates and colon-less lines count too
            lines += 1;
            if lines > self.max_headers {
                return Err(Error::TooManyHeaders {
                    limit: self.max_headers,
                });
            }
            // Lines without a colon are skipped
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim(), value.trim());
            }
        }

        Ok(Request {
            method,
            target,
            version,
            headers,
            body: None,
        })
    }

    /// Read the body declared by `Content-Length`, for `POST` only.
    pub async fn read_body<R>(&self, reader: &mut R, request: &mut Request) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        if request.method != "POST" {
            return Ok(());
        }
        let Some(declared) = request.header("Content-Length") else {
            return Ok(());
        };
        let length: usize = declared
            .parse()
            .map_err(|_| Error::InvalidContentLength(declared.to_string()))?;
        if length > self.max_body_size {
            return Err(Error::PayloadTooLarge {
                declared: length,
                limit: self.max_body_size,
            });
        }

        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::ConnectionClosed,
            _ => Error::Io(e),
        })?;
        request.body = Some(body);
        Ok(())
    }

    /// Read one request in full: head, then body.
    pub async fn read_request<R>(&self, reader: &mut R) -> Result<Request>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut request = self.read_head(reader).await?;
        self.read_body(reader, &mut request).await?;
        Ok(request)
    }

    fn parse_request_line(&self, line: &str) -> Result<(String, String, String)> {
        let trimmed = line.trim();
        let parts: Vec<&str> = trimmed.split(' ').collect();
        match parts.as_slice() {
            [method, target, version] if *version == self.version.as_str() => {
                Ok((method.to_string(), target.to_string(), version.to_string()))
            }
            _ => Err(Error::MalformedRequestLine(trimmed.to_string())),
        }
    }

    /// Read through the next `\n`. EOF before it means the peer went away.
    async fn read_line<R>(&self, reader: &mut R) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
    {
        let limit = self.max_line_length as u64;
        let mut buf = Vec::new();
        let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;

        if buf.last() != Some(&b'\n') {
            if n as u64 >= limit {
                return Err(Error::LineTooLong {
                    limit: self.max_line_length,
                });
            }
            return Err(Error::ConnectionClosed);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

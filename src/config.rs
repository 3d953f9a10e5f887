//! Server configuration.
//!
//! All fields have defaults, so an empty TOML file (or no file at all) gives
//! the reference behaviour: HTTP/1.1 with keep-alive, h2c upgrade enabled and
//! a 5 second idle window.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default cap on header lines in one request.
pub const DEFAULT_MAX_HEADERS: usize = 100;

/// Version token a session expects on every request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HttpVersion {
    #[serde(rename = "HTTP/1.0")]
    Http10,
    #[serde(rename = "HTTP/1.1")]
    Http11,
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Read inactivity after which a session is dropped.
    pub idle_timeout_ms: u64,

    pub http_version: HttpVersion,

    /// When false every response carries `Connection: close`.
    pub keep_alive: bool,

    /// When false `Upgrade: h2c` requests are routed like any other.
    pub h2c_upgrade: bool,

    /// Longest accepted request or header line, terminator included.
    pub max_line_length: usize,

    /// Most header lines accepted in one request.
    pub max_headers: usize,

    /// Largest accepted `Content-Length`.
    pub max_body_size: usize,

    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            idle_timeout_ms: 5_000,
            http_version: HttpVersion::Http11,
            keep_alive: true,
            h2c_upgrade: true,
            max_line_length: 8 * 1024,
            max_headers: DEFAULT_MAX_HEADERS,
            max_body_size: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.idle_timeout_ms == 0 {
            return Err(Error::Config("idle_timeout_ms must be greater than zero".into()));
        }
        if self.max_line_length == 0 {
            return Err(Error::Config("max_line_length must be greater than zero".into()));
        }
        if self.max_headers == 0 {
            return Err(Error::Config("max_headers must be greater than zero".into()));
        }
        if self.max_body_size == 0 {
            return Err(Error::Config("max_body_size must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e| Error::Config(format!("bind_address {:?}: {}", self.bind_address, e)))
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

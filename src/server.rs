//! TCP acceptor: one task per connection, nothing shared between them.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::session::{Session, SessionOutcome};

static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection, used only for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Bind to `config.bind_address`.
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        let listener = TcpListener::bind(config.socket_addr()?).await?;
        info!(
            address = %listener.local_addr()?,
            version = %config.http_version,
            h2c_upgrade = config.h2c_upgrade,
            "listening"
        );

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept forever. Accept errors are logged and the loop continues.
    pub async fn run(self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((socket, peer)) => self.spawn_session(socket, peer),
                Err(e) => error!(error = %e, "accept failed"),
            }
        }
    }

    fn spawn_session(&self, socket: TcpStream, peer: SocketAddr) {
        let id = ConnectionId::next();
        let config = Arc::clone(&self.config);
        let span = info_span!("session", id = %id, peer = %peer);

        tokio::spawn(
            async move {
                info!("accepted");
                match Session::new(socket, &config).run().await {
                    Ok(SessionOutcome::Closed) => info!("closed on request"),
                    Ok(SessionOutcome::Upgraded) => info!("closed after h2c greeting"),
                    Err(e) if e.is_silent() => debug!(reason = %e, "closed"),
                    Err(e) => warn!(error = %e, "session aborted"),
                }
            }
            .instrument(span),
        );
    }
}

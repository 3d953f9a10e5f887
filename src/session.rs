//! Per-connection HTTP/1.x state machine.
//!
//! ```text
//! AwaitingRequest ─▶ ParsingHeaders ─┬─▶ RoutingAndResponding ─┬─▶ AwaitingRequest (keep-alive)
//!        ▲                           │                         └─▶ Closing
//!        └── deadline re-armed       └─▶ 101 ─▶ H2cSession (terminal, once)
//! ```
//!
//! A [`Session`] owns its stream for its whole life. The upgrade consumes the
//! session and hands the stream to an [`H2cSession`]; there is no way back.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::h2c::H2cSession;
use crate::request::RequestParser;
use crate::response::{ConnectionMode, Response};
use crate::routes::route;

/// How a session ended when it ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A response carried `Connection: close`.
    Closed,
    /// The h2c greeting was sent.
    Upgraded,
}

enum Transition {
    Close,
    Upgrade,
}

/// Run `fut` against the session's idle deadline.
pub(crate) async fn with_deadline<F, T>(deadline: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| Error::IdleTimeout)?
}

pub struct Session<S> {
    stream: BufReader<S>,
    parser: RequestParser,
    idle_timeout: Duration,
    deadline: Instant,
    keep_alive: bool,
    h2c_upgrade: bool,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: &ServerConfig) -> Self {
        let idle_timeout = config.idle_timeout();
        Self {
            stream: BufReader::new(stream),
            parser: RequestParser::from_config(config),
            idle_timeout,
            deadline: Instant::now() + idle_timeout,
            keep_alive: config.keep_alive,
            h2c_upgrade: config.h2c_upgrade,
        }
    }

    /// Serve requests until the connection closes, upgrades, or fails.
    ///
    /// Errors the peer should hear about (400, 413) are answered before the
    /// error is returned. The stream is shut down in every case.
    pub async fn run(mut self) -> Result<SessionOutcome> {
        match self.serve().await {
            Ok(Transition::Close) => {
                self.shutdown().await;
                Ok(SessionOutcome::Closed)
            }
            Ok(Transition::Upgrade) => {
                self.into_h2c().run().await?;
                Ok(SessionOutcome::Upgraded)
            }
            Err(err) => {
                if let Some((status, body)) = err.rejection() {
                    let response = Response::new(status, body).with_connection(ConnectionMode::Close);
                    if let Err(e) = self.write_response(&response).await {
                        debug!(error = %e, "failed to write rejection");
                    }
                }
                self.shutdown().await;
                Err(err)
            }
        }
    }

    async fn serve(&mut self) -> Result<Transition> {
        loop {
            self.deadline = Instant::now() + self.idle_timeout;

            let mut request = with_deadline(self.deadline, self.parser.read_head(&mut self.stream)).await?;
            debug!(
                method = %request.method,
                target = %request.target,
                headers = request.headers.len(),
                "request"
            );

            if self.h2c_upgrade && request.wants_h2c_upgrade() {
                self.write_response(&Response::switching_protocols()).await?;
                return Ok(Transition::Upgrade);
            }

            with_deadline(self.deadline, self.parser.read_body(&mut self.stream, &mut request)).await?;

            let mode = if self.keep_alive {
                request.connection_mode()
            } else {
                ConnectionMode::Close
            };
            let response = route(&request).with_connection(mode);
            self.write_response(&response).await?;
            debug!(status = response.status.code(), connection = mode.as_str(), "response");

            if mode == ConnectionMode::Close {
                return Ok(Transition::Close);
            }
        }
    }

    async fn write_response(&mut self, response: &Response) -> Result<()> {
        let wire = response.encode(self.parser.version());
        self.stream.write_all(&wire).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            trace!(error = %e, "shutdown failed");
        }
    }

    fn into_h2c(self) -> H2cSession<S> {
        H2cSession::new(self.stream, self.deadline)
    }
}

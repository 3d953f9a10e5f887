//! One-shot h2c greeting sent after `101 Switching Protocols`.
//!
//! Reads the client connection preface, then writes SETTINGS, HEADERS and
//! DATA and ends the connection. Peer frames are never read.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{info, trace};

use crate::error::{Error, Result};
use crate::h2_codec::{flags, frame_type, is_h2c_preface, write_frame, CONNECTION_PREFACE};
use crate::hpack;
use crate::session::with_deadline;

/// Body of the DATA frame.
pub const GREETING_BODY: &[u8] = b"Hello, HTTP/2!";

/// Stream the greeting response is sent on.
pub const GREETING_STREAM_ID: u32 = 1;

pub struct H2cSession<S> {
    stream: BufReader<S>,
    deadline: Instant,
}

impl<S> H2cSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Takes over the stream (and any bytes already buffered) from a plain session.
    pub(crate) fn new(stream: BufReader<S>, deadline: Instant) -> Self {
        Self { stream, deadline }
    }

    pub async fn run(mut self) -> Result<()> {
        let result = self.greet().await;
        if let Err(e) = self.stream.shutdown().await {
            trace!(error = %e, "shutdown failed");
        }
        result
    }

    async fn greet(&mut self) -> Result<()> {
        self.read_preface().await?;
        info!("h2c upgrade successful");

        let header_block = hpack::encode_status(200);

        write_frame(&mut self.stream, frame_type::SETTINGS, 0, 0, &[]).await?;
        write_frame(
            &mut self.stream,
            frame_type::HEADERS,
            flags::END_HEADERS | flags::END_STREAM,
            GREETING_STREAM_ID,
            &header_block,
        )
        .await?;
        write_frame(
            &mut self.stream,
            frame_type::DATA,
            flags::END_STREAM,
            GREETING_STREAM_ID,
            GREETING_BODY,
        )
        .await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn read_preface(&mut self) -> Result<()> {
        let stream = &mut self.stream;
        with_deadline(self.deadline, async move {
            let mut preface = [0u8; CONNECTION_PREFACE.len()];
            stream.read_exact(&mut preface).await.map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => Error::InvalidUpgradePreface,
                _ => Error::Io(e),
            })?;
            if is_h2c_preface(&preface) {
                Ok(())
            } else {
                Err(Error::InvalidUpgradePreface)
            }
        })
        .await
    }
}

//! h2c-server: a minimal HTTP/1.1 server with an in-band h2c upgrade
//!
//! Each accepted TCP connection runs its own [`Session`]: a keep-alive loop
//! that parses requests, answers two fixed routes and enforces an idle
//! deadline. A request carrying `Upgrade: h2c` switches the connection to
//! HTTP/2 framing for a single greeting and then closes it.
//!
//! # Quick Start
//!
//! ```no_run
//! use h2c_server::{Server, ServerConfig};
//!
//! # async fn run() -> h2c_server::Result<()> {
//! let config = ServerConfig {
//!     bind_address: "127.0.0.1:8080".to_string(),
//!     ..ServerConfig::default()
//! };
//! Server::bind(config).await?.run().await
//! # }
//! ```
//!
//! # Wire behaviour
//!
//! | Request                                   | Response                                   |
//! |-------------------------------------------|--------------------------------------------|
//! | `GET /`                                   | `200`, `Hello, World!`                     |
//! | `POST /` with body B                      | `200`, `Received: ` + B                    |
//! | anything else                             | `404`, `Not Found`                         |
//! | bad request line / `Content-Length`       | `400`, then close                          |
//! | more than `max_headers` header lines      | `400`, then close                          |
//! | `Connection: Upgrade` + `Upgrade: h2c`    | `101`, preface check, SETTINGS/HEADERS/DATA |
//!
//! Sessions can also be driven over any `AsyncRead + AsyncWrite` stream,
//! which is how the tests run them in memory.

pub mod config;
pub mod error;
pub mod h2_codec;
pub mod h2c;
pub mod hpack;
pub mod logging;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod session;

pub use config::{HttpVersion, ServerConfig};
pub use error::{Error, Result};
pub use h2_codec::{
    encode_frame, flags, frame_type, is_h2c_preface, write_frame, H2FrameHeader,
    CONNECTION_PREFACE, FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD,
};
pub use h2c::{H2cSession, GREETING_BODY, GREETING_STREAM_ID};
pub use hpack::encode_status;
pub use request::{HeaderMap, Request, RequestParser};
pub use response::{ConnectionMode, Response, Status};
pub use server::{ConnectionId, Server};
pub use session::{Session, SessionOutcome};

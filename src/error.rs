use thiserror::Error;

use crate::response::Status;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a session (or, for `Config`, prevent the server from starting).
///
/// Every variant is terminal for the session that produced it. None of them
/// reach the acceptor.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("more than {limit} header lines")]
    TooManyHeaders { limit: usize },

    #[error("declared body of {declared} bytes exceeds limit of {limit}")]
    PayloadTooLarge { declared: usize, limit: usize },

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("idle timeout elapsed")]
    IdleTimeout,

    #[error("invalid h2c connection preface")]
    InvalidUpgradePreface,

    #[error("frame payload of {0} bytes does not fit in 24 bits")]
    FrameTooLarge(usize),

    #[error("config: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status and body to send before closing, for errors reported to the peer.
    ///
    /// `None` means the session ends without writing anything.
    pub fn rejection(&self) -> Option<(Status, &'static str)> {
        match self {
            Error::MalformedRequestLine(_) => Some((Status::BadRequest, "Invalid request")),
            Error::InvalidContentLength(_) => Some((Status::BadRequest, "Invalid Content-Length")),
            Error::LineTooLong { .. } => Some((Status::BadRequest, "Line too long")),
            Error::TooManyHeaders { .. } => Some((Status::BadRequest, "Too many headers")),
            Error::PayloadTooLarge { .. } => Some((Status::PayloadTooLarge, "Payload Too Large")),
            _ => None,
        }
    }

    /// True for the "peer went away" class: EOF mid-request or idle timeout.
    pub fn is_silent(&self) -> bool {
        match self {
            Error::ConnectionClosed | Error::IdleTimeout => true,
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}

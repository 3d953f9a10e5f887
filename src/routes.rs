//! The two fixed routes the server answers, plus the 404 fallback.

use crate::request::Request;
use crate::response::{Response, Status};

pub const GREETING: &str = "Hello, World!";
pub const ECHO_LABEL: &str = "Received: ";
pub const NOT_FOUND: &str = "Not Found";

/// Map a parsed request to its response body and status.
///
/// The `Connection` header is the session's business, not the route's.
pub fn route(request: &Request) -> Response {
    match (request.method.as_str(), request.target.as_str()) {
        ("GET", "/") => Response::new(Status::Ok, GREETING),
        ("POST", "/") => {
            let mut body = ECHO_LABEL.as_bytes().to_vec();
            body.extend_from_slice(request.body.as_deref().unwrap_or_default());
            Response::new(Status::Ok, body)
        }
        _ => Response::new(Status::NotFound, NOT_FOUND),
    }
}

//! HPACK header blocks (RFC 7541) for the greeting response.
//!
//! The server only ever emits a `:status` pseudo-header, which the static
//! table covers, so a fresh `fluke_hpack::Encoder` per block is enough and
//! no dynamic-table state outlives one greeting.

/// Header block carrying only `:status: <code>`.
///
/// Statuses in the static table (200, 204, 206, 304, 400, 404, 500)
/// encode to a single indexed byte.
pub fn encode_status(code: u16) -> Vec<u8> {
    let value = code.to_string();
    fluke_hpack::Encoder::new().encode([(&b":status"[..], value.as_bytes())])
}

//! HTTP/2 frame codec for the post-upgrade greeting.
//!
//! Only the pieces the h2c greeting needs:
//! 1. Encoding a typed, flagged, stream-identified frame into its wire layout
//! 2. Parsing a 9-byte frame header back (used to verify what was written)
//! 3. Recognising the client connection preface
//!
//! Frames are never multiplexed and the peer's frames are never parsed.
//!
//! Reference: RFC 7540 Section 4.1

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// HTTP/2 frame types used by the greeting (RFC 7540 Section 6)
pub mod frame_type {
    pub const DATA: u8 = 0x0;
    pub const HEADERS: u8 = 0x1;
    pub const SETTINGS: u8 = 0x4;
}

/// HTTP/2 frame flags
pub mod flags {
    pub const END_STREAM: u8 = 0x1;
    pub const END_HEADERS: u8 = 0x4;
}

/// Size of the fixed frame header.
pub const FRAME_HEADER_LEN: usize = 9;

/// Largest payload a 24-bit length field can describe.
pub const MAX_FRAME_PAYLOAD: usize = (1 << 24) - 1;

/// Mask that clears the reserved high bit of a stream identifier.
pub const STREAM_ID_MASK: u32 = 0x7FFF_FFFF;

/// The HTTP/2 connection preface (24 bytes)
pub const CONNECTION_PREFACE: &[u8] = b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n";

/// A parsed HTTP/2 frame header (9 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H2FrameHeader {
    pub length: u32,      // 24 bits
    pub frame_type: u8,
    pub flags: u8,
    pub stream_id: u32,   // 31 bits (high bit reserved)
}

impl H2FrameHeader {
    /// Parse a 9-byte frame header
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < FRAME_HEADER_LEN {
            return None;
        }

        let length = ((data[0] as u32) << 16) | ((data[1] as u32) << 8) | (data[2] as u32);
        let stream_id = u32::from_be_bytes([data[5], data[6], data[7], data[8]]) & STREAM_ID_MASK;

        Some(Self {
            length,
            frame_type: data[3],
            flags: data[4],
            stream_id,
        })
    }

    /// Total frame size including header
    pub fn total_size(&self) -> usize {
        FRAME_HEADER_LEN + self.length as usize
    }

    /// Check if END_STREAM flag is set
    pub fn is_end_stream(&self) -> bool {
        self.flags & flags::END_STREAM != 0
    }

    /// Check if END_HEADERS flag is set
    pub fn is_end_headers(&self) -> bool {
        self.flags & flags::END_HEADERS != 0
    }
}

/// Check if data starts with HTTP/2 connection preface (h2c detection)
pub fn is_h2c_preface(data: &[u8]) -> bool {
    data.len() >= CONNECTION_PREFACE.len() && &data[..CONNECTION_PREFACE.len()] == CONNECTION_PREFACE
}

/// Encode one frame: 3-byte length, type, flags, 4-byte stream id, payload.
///
/// The reserved bit of `stream_id` is always cleared. Payloads longer than
/// [`MAX_FRAME_PAYLOAD`] are rejected.
pub fn encode_frame(frame_type: u8, flags: u8, stream_id: u32, payload: &[u8]) -> Result<Vec<u8>> {
    let length = payload.len();
    if length > MAX_FRAME_PAYLOAD {
        return Err(Error::FrameTooLarge(length));
    }

    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + length);
    frame.push((length >> 16) as u8);
    frame.push((length >> 8) as u8);
    frame.push(length as u8);
    frame.push(frame_type);
    frame.push(flags);
    frame.extend_from_slice(&(stream_id & STREAM_ID_MASK).to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Encode a frame and write it to `dst` in one call.
///
/// A short write is a transport failure and surfaces as `Error::Io`.
pub async fn write_frame<W>(dst: &mut W, frame_type: u8, flags: u8, stream_id: u32, payload: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(frame_type, flags, stream_id, payload)?;
    dst.write_all(&frame).await?;
    Ok(())
}

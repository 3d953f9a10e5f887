//! Tests for HTTP/2 frame encoding

use h2c_server::{encode_frame, flags, frame_type, write_frame, Error, FRAME_HEADER_LEN, MAX_FRAME_PAYLOAD};

#[test]
fn test_settings_frame_empty_payload() {
    let frame = encode_frame(frame_type::SETTINGS, 0, 0, &[]).unwrap();
    assert_eq!(frame.len(), 9);
    assert_eq!(&frame[0..3], &[0, 0, 0]);
    assert_eq!(frame[3], frame_type::SETTINGS);
    assert_eq!(frame[4], 0);
    assert_eq!(&frame[5..9], &[0, 0, 0, 0]);
}

#[test]
fn test_headers_frame_end_headers_end_stream() {
    let frame = encode_frame(frame_type::HEADERS, flags::END_HEADERS | flags::END_STREAM, 1, &[0x88]).unwrap();
    assert_eq!(frame[4], 0x5);
    assert_eq!(&frame[9..], &[0x88u8]);
}

#[test]
fn test_data_frame_payload_follows_header() {
    let payload = b"Hello, HTTP/2!";
    let frame = encode_frame(frame_type::DATA, flags::END_STREAM, 1, payload).unwrap();
    assert_eq!(frame.len(), FRAME_HEADER_LEN + payload.len());
    assert_eq!(&frame[0..3], &[0, 0, 14]);
    assert_eq!(&frame[9..], payload);
}

#[test]
fn test_reserved_bit_never_set() {
    for stream_id in [0x8000_0000, 0xFFFF_FFFF, 0x8000_0001] {
        let frame = encode_frame(frame_type::DATA, 0, stream_id, &[]).unwrap();
        assert_eq!(frame[5] & 0x80, 0, "stream id {stream_id:#x}");
    }
}

#[test]
fn test_max_payload_accepted() {
    let payload = vec![0u8; MAX_FRAME_PAYLOAD];
    let frame = encode_frame(frame_type::DATA, 0, 1, &payload).unwrap();
    assert_eq!(&frame[0..3], &[0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_oversized_payload_rejected() {
    let payload = vec![0u8; MAX_FRAME_PAYLOAD + 1];
    let err = encode_frame(frame_type::DATA, 0, 1, &payload).unwrap_err();
    assert!(matches!(err, Error::FrameTooLarge(_)));
}

#[tokio::test]
async fn test_write_frame_to_stream() {
    let (mut client, mut server) = tokio::io::duplex(64);
    write_frame(&mut server, frame_type::SETTINGS, 0, 0, &[]).await.unwrap();
    drop(server);

    let mut received = Vec::new();
    tokio::io::AsyncReadExt::read_to_end(&mut client, &mut received).await.unwrap();
    assert_eq!(received, vec![0, 0, 0, 4, 0, 0, 0, 0, 0]);
}

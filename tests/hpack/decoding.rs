//! The greeting's header block, read back by an independent decoder

use h2c_server::encode_status;

#[test]
fn test_decode_greeting_header_block() {
    let headers = fluke_hpack::Decoder::new().decode(&encode_status(200)).unwrap();

    assert_eq!(headers, vec![(b":status".to_vec(), b"200".to_vec())]);
}

#[test]
fn test_decode_literal_status() {
    let headers = fluke_hpack::Decoder::new().decode(&encode_status(418)).unwrap();

    assert_eq!(headers, vec![(b":status".to_vec(), b"418".to_vec())]);
}

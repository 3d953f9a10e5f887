//! Tests for HPACK encoding of the greeting's header block

use h2c_server::encode_status;

#[test]
fn test_status_200_single_byte() {
    assert_eq!(encode_status(200), vec![0x88]);
}

#[test]
fn test_encoding_is_stateless() {
    // A fresh encoder per block, so repeats never turn into dynamic-table hits
    assert_eq!(encode_status(418), encode_status(418));
}

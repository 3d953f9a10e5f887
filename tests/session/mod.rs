//! Sessions driven over in-memory duplex pipes.

use h2c_server::{Result, ServerConfig, Session, SessionOutcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

mod idle_timeout;

/// Start a session on one end of a pipe and return the client end.
pub fn start(config: ServerConfig) -> (DuplexStream, JoinHandle<Result<SessionOutcome>>) {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let handle = tokio::spawn(Session::new(server, &config).run());
    (client, handle)
}

/// Send raw bytes, half-close, then read everything until the server closes.
pub async fn exchange(config: ServerConfig, raw: &[u8]) -> (Vec<u8>, Result<SessionOutcome>) {
    let (mut client, handle) = start(config);
    client.write_all(raw).await.unwrap();
    client.shutdown().await.unwrap();
    let mut received = Vec::new();
    client.read_to_end(&mut received).await.unwrap();
    (received, handle.await.unwrap())
}

/// Read exactly one response with a `Content-Length` body.
pub async fn read_response(client: &mut DuplexStream) -> String {
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        let mut byte = [0u8; 1];
        let n = client.read(&mut byte).await.unwrap();
        assert!(n > 0, "connection closed mid-response: {:?}", String::from_utf8_lossy(&head));
        head.push(byte[0]);
    }
    let head = String::from_utf8(head).unwrap();
    let length: usize = head
        .lines()
        .find_map(|l| l.strip_prefix("Content-Length: "))
        .map(|v| v.trim().parse().unwrap())
        .unwrap_or(0);

    let mut body = vec![0u8; length];
    client.read_exact(&mut body).await.unwrap();
    head + &String::from_utf8(body).unwrap()
}

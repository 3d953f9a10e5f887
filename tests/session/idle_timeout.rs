//! Idle deadline enforcement, on paused virtual time.

use std::time::Duration;

use h2c_server::{Error, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::{read_response, start};

#[tokio::test(start_paused = true)]
async fn test_silent_client_is_dropped() {
    let (mut client, handle) = start(ServerConfig::default());

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert!(!handle.is_finished());

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(Error::IdleTimeout)));

    // Nothing was written before the close
    let mut received = Vec::new();
    client.read_to_end(&mut received).await.unwrap();
    assert!(received.is_empty());

    // Writes now fail
    assert!(client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_completed_request_rearms_deadline() {
    let (mut client, handle) = start(ServerConfig::default());

    tokio::time::sleep(Duration::from_secs(4)).await;
    client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    read_response(&mut client).await;

    // 8s after start, but only 4s after the last cycle
    tokio::time::sleep(Duration::from_secs(4)).await;
    client.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    let response = read_response(&mut client).await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(Error::IdleTimeout)));
}

#[tokio::test(start_paused = true)]
async fn test_partial_request_still_times_out() {
    let (mut client, handle) = start(ServerConfig::default());

    client.write_all(b"GET / HTTP/1.1\r\nHost: slow").await.unwrap();

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(Error::IdleTimeout)));
}

#[tokio::test(start_paused = true)]
async fn test_configured_idle_window() {
    let config = ServerConfig {
        idle_timeout_ms: 250,
        ..ServerConfig::default()
    };
    let (_client, handle) = start(config);

    let started = tokio::time::Instant::now();
    let result = handle.await.unwrap();
    assert!(matches!(result, Err(Error::IdleTimeout)));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(1), "{elapsed:?}");
}

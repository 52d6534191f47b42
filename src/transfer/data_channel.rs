//! Module `data_channel`
//!
//! Establishes the outbound data connection back to a client's advertised
//! endpoint. Each session opens exactly one data connection, and only
//! after the control command has been validated and acknowledged.

use log::{debug, info, warn};
use std::time::Duration;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::sleep;

use crate::error::TransferError;
use crate::protocol::Endpoint;

/// Dials the endpoint once.
///
/// Resolves `host:port` (numeric and name-based forms both work), attempts
/// each candidate address in turn, and returns the first stream that
/// connects. All candidates failing is a single dial failure.
pub async fn connect_for_data(endpoint: &Endpoint) -> Result<TcpStream, TransferError> {
    let authority = endpoint.authority();

    let candidates = match lookup_host(authority.as_str()).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Failed to resolve data endpoint {}: {}", authority, e);
            return Err(dial_failed(endpoint));
        }
    };

    for addr in candidates {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                info!("Data connection established to {}", addr);
                return Ok(stream);
            }
            Err(e) => {
                debug!("Candidate address {} failed: {}", addr, e);
            }
        }
    }

    Err(dial_failed(endpoint))
}

/// Dials the endpoint with bounded retries.
///
/// The client binds its listener before advertising the endpoint, but the
/// accept may not be posted yet when the dial arrives; a refused dial is
/// retried with exponential backoff up to `max_attempts` tries.
pub async fn connect_with_retry(
    endpoint: &Endpoint,
    max_attempts: u32,
    initial_backoff: Duration,
) -> Result<TcpStream, TransferError> {
    let mut delay = initial_backoff;
    let mut attempt = 1;

    loop {
        match connect_for_data(endpoint).await {
            Ok(stream) => return Ok(stream),
            Err(e) if attempt < max_attempts => {
                warn!(
                    "Dial attempt {}/{} to {} failed: {}",
                    attempt,
                    max_attempts,
                    endpoint.authority(),
                    e
                );
                sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn dial_failed(endpoint: &Endpoint) -> TransferError {
    TransferError::DialFailed {
        host: endpoint.host.clone(),
        port: endpoint.port.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn local_endpoint(port: u16) -> Endpoint {
        Endpoint {
            host: "127.0.0.1".to_string(),
            port: port.to_string(),
        }
    }

    #[tokio::test]
    async fn test_connect_to_listening_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let stream = connect_for_data(&local_endpoint(port)).await.unwrap();
        let (_, peer) = listener.accept().await.unwrap();
        assert_eq!(stream.local_addr().unwrap(), peer);
    }

    #[tokio::test]
    async fn test_dial_failure_reports_endpoint() {
        // Bind then drop to obtain a port that is no longer listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result =
            connect_with_retry(&local_endpoint(port), 2, Duration::from_millis(10)).await;
        match result {
            Err(TransferError::DialFailed { host, port: p }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port.to_string());
            }
            other => panic!("expected DialFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retry_reaches_late_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        // Rebind the same port shortly after the first dial fails.
        let rebind = tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            TcpListener::bind(("127.0.0.1", port)).await
        });

        let result =
            connect_with_retry(&local_endpoint(port), 5, Duration::from_millis(40)).await;
        let rebound = rebind.await.unwrap();
        if rebound.is_ok() {
            assert!(result.is_ok());
        }
    }
}

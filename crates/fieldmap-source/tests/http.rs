//! Integration test: fetch field descriptions from a local HTTP endpoint.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldmap_layout::mock::mock_field_description;
use fieldmap_source::{FieldCache, FieldSource, HttpSource, SourceError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Client that talks to the local server directly, whatever the proxy
/// environment says.
fn local_source(url: String) -> HttpSource {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpSource::with_client(client, url)
}

/// Serve `status` and `body` to every connection; count connections.
async fn serve(status: &'static str, body: String) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/field", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&chunk[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    (url, hits)
}

#[tokio::test]
async fn fetches_description_over_http() {
    let body = serde_json::to_string(&mock_field_description()).unwrap();
    let (url, hits) = serve("200 OK", body).await;
    let description = local_source(url).fetch().await.unwrap();
    assert_eq!(description, mock_field_description());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cache_hits_the_network_once() {
    let body = serde_json::to_string(&mock_field_description()).unwrap();
    let (url, hits) = serve("200 OK", body).await;
    let cache = FieldCache::new(local_source(url));
    let first = cache.get().await.unwrap();
    let second = cache.get().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let (url, _) = serve("500 Internal Server Error", String::new()).await;
    let err = local_source(url).fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Status(s) if s.as_u16() == 500));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn malformed_json_is_a_fetch_failure() {
    let (url, _) = serve("200 OK", "{\"parkingZone\": ".to_owned()).await;
    let err = local_source(url).fetch().await.unwrap_err();
    assert!(matches!(err, SourceError::Parse(_)));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_fetch_failure() {
    // Bind and drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = local_source(format!("http://{addr}/field"))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Fetch(_)));
}

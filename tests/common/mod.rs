//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use cors_proxy::config::ProxyConfig;
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::Shutdown;
use cors_proxy::upstream::UpstreamClient;

/// Handle onto a mock upstream: where it listens and what it saw.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Number of requests that reached the upstream.
    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw head (request line + headers) of the n-th recorded request.
    pub fn request_head(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n].clone()
    }
}

/// Start a mock upstream returning a fixed status and body, recording
/// every request head it receives.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_mock_upstream_with_delay(status, body, Duration::ZERO).await
}

/// Same as `start_mock_upstream`, but waits before answering. Drives
/// the proxy's upstream timeout.
pub async fn start_mock_upstream_with_delay(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let task_hits = hits.clone();
    let task_requests = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let hits = task_hits.clone();
                    let requests = task_requests.clone();
                    tokio::spawn(async move {
                        serve_one(socket, status, body, delay, hits, requests).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream {
        addr,
        hits,
        requests,
    }
}

async fn serve_one(
    mut socket: TcpStream,
    status: u16,
    body: &'static str,
    delay: Duration,
    hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<String>>>,
) {
    // GET requests carry no body, so the head ends the read.
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    hits.fetch_add(1, Ordering::SeqCst);
    requests
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf).into_owned());

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Spawn the proxy on an ephemeral port. Returns its address and the
/// shutdown handle keeping it stoppable.
pub async fn spawn_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let upstream = UpstreamClient::new(&config.upstream).unwrap();
    let server = HttpServer::new(config, upstream);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Test HTTP client that never picks up system proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use eth_failover_proxy::config::ProxyConfig;
use eth_failover_proxy::http::HttpServer;
use eth_failover_proxy::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Read one HTTP/1.1 request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(String::from_utf8_lossy(&buf[header_end..]).into_owned())
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// A mock provider: answers every request with whatever `f` returns and
/// counts hits.
#[allow(dead_code)]
pub struct MockProvider {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a programmable provider. `f` receives the request body.
pub async fn start_programmable_provider<F, Fut>(f: F) -> MockProvider
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let Some(body) = read_request(&mut socket).await else {
                            return;
                        };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let (status, response) = f(body).await;
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockProvider { addr, hits }
}

/// Start a provider that always answers with a fixed status and body.
#[allow(dead_code)]
pub async fn start_fixed_provider(status: u16, body: &'static str) -> MockProvider {
    start_programmable_provider(move |_| async move { (status, body.to_string()) }).await
}

/// Start a provider that never answers within `delay`.
#[allow(dead_code)]
pub async fn start_stalled_provider(delay: Duration) -> MockProvider {
    start_programmable_provider(move |_| async move {
        tokio::time::sleep(delay).await;
        (200, r#"{"jsonrpc":"2.0","id":1,"result":"late"}"#.to_string())
    })
    .await
}

/// A URL on loopback that refuses connections.
#[allow(dead_code)]
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(providers: Vec<String>, timeout_secs: u64) -> (SocketAddr, Shutdown) {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.providers = providers;
    config.upstream.timeout_secs = timeout_secs;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

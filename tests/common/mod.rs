//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::time::Duration;

use erised::config::ServerConfig;
use erised::http::HttpServer;
use erised::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on a loopback port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server on an ephemeral loopback port.
pub async fn start_server(config: ServerConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, shutdown.clone());

    let task = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    RunningServer { addr, shutdown, task }
}

/// Client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

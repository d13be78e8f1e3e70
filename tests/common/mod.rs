//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use mock_api::MockConfig;
use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// A running server recording into its own temporary directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub pid: u32,
    pub dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Absolute URL for a request target on this server.
    pub fn url(&self, target: &str) -> String {
        format!("http://{}{}", self.addr, target)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Parse a record file.
    pub fn read_record(&self, name: &str) -> Value {
        let bytes = std::fs::read(self.dir.path().join(name))
            .unwrap_or_else(|e| panic!("record {} unreadable: {}", name, e));
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Sorted names of record files starting with `prefix-`.
    #[allow(dead_code)]
    pub fn record_names(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(&format!("{}-", prefix)))
            .collect();
        names.sort();
        names
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start a server on an ephemeral localhost port.
pub async fn start_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();

    let mut config = MockConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.recording.dir = dir.path().to_path_buf();

    let started = mock_api::start(&config).await.unwrap();
    let addr = started.listener.local_addr().unwrap();
    let pid = started.pid;
    let handle = tokio::spawn(started.serve());

    TestServer {
        addr,
        pid,
        dir,
        handle,
    }
}

/// HTTP client without pooling, so every request opens its own connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send raw bytes and return everything the server writes back before closing.
#[allow(dead_code)]
pub async fn raw_exchange(addr: SocketAddr, request: &[u8], close_write: bool) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    if close_write {
        stream.shutdown().await.unwrap();
    }

    let mut reply = Vec::new();
    // A reset counts as an empty reply.
    let _ = stream.read_to_end(&mut reply).await;
    reply
}

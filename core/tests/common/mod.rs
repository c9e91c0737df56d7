//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use testapp_core::{CommandProxyRunner, PortSpec, Result, ServerConfig, Termination, TestApp};

/// A parsed HTTP response.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub head: String,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("body is not UTF-8")
    }
}

/// Send a request with `Connection: close` and read the whole reply.
pub async fn request(addr: SocketAddr, method: &str, path: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        method, path, addr
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    parse_reply(&raw)
}

pub async fn get(addr: SocketAddr, path: &str) -> Reply {
    request(addr, "GET", path).await
}

fn parse_reply(raw: &[u8]) -> Reply {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no end of headers");
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("no status code");
    Reply {
        status,
        head,
        body: raw[split + 4..].to_vec(),
    }
}

/// Bind an app on an ephemeral loopback port.
pub async fn bind_app(spec: PortSpec, config: ServerConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    TestApp::from_listener(spec, config, listener).unwrap()
}

/// Serve without a proxy until the test ends.
pub async fn serve(data_file: impl Into<PathBuf>) -> SocketAddr {
    let spec = PortSpec::resolve("8000", None).unwrap();
    let app = bind_app(spec, ServerConfig::new().with_data_file(data_file)).await;
    let addr = app.local_addr();
    tokio::spawn(app.run(CommandProxyRunner::default(), std::future::pending()));
    addr
}

/// Run an app in the background with the given runner and shutdown signal.
pub fn spawn_app<F>(
    app: TestApp,
    runner: CommandProxyRunner,
    shutdown: F,
) -> JoinHandle<Result<Termination>>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(app.run(runner, shutdown))
}

/// First port in the accepted app range that is free on loopback right now.
pub fn free_app_port() -> u16 {
    (20_000..30_000)
        .find(|port| std::net::TcpListener::bind(("127.0.0.1", *port)).is_ok())
        .expect("no free port in range")
}

/// Write an executable shell script into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

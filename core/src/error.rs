//! Error types for the testapp-core library.

use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias for testapp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving ports, launching the proxy or serving.
#[derive(Error, Debug)]
pub enum Error {
    /// The front port token is not an integer.
    #[error("bad port: {token:?}")]
    BadPort { token: String },

    /// The resolved app port falls outside the accepted range.
    #[error("bad port: {app_port} (front port {front_port} + offset {offset})")]
    PortOutOfRange {
        front_port: i64,
        offset: i64,
        app_port: i64,
    },

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The proxy command could not be started.
    #[error("failed to launch proxy command {command}: {source}")]
    ProxySpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running proxy failed before an exit status was known.
    #[error("failed to wait for proxy: {0}")]
    ProxyWait(#[source] std::io::Error),

    /// The proxy launcher was driven out of order.
    #[error("proxy launcher cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Runtime settings for the test app.
//!
//! There is no configuration file; the CLI fills these from flags and
//! environment variables.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::DEFAULT_PROXY_COMMAND;

/// File served by `GET /file`, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/file";

/// How long open connections may linger after a shutdown request.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Settings shared by the server and the proxy launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the listener binds. All interfaces by default.
    pub host: IpAddr,

    /// File returned by `GET /file`.
    pub data_file: PathBuf,

    /// Program started with `<front_port> <app_port>` when an offset is given.
    pub proxy_command: PathBuf,

    /// Grace period for open connections once shutdown is requested.
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            proxy_command: PathBuf::from(DEFAULT_PROXY_COMMAND),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_proxy_command(mut self, command: impl Into<PathBuf>) -> Self {
        self.proxy_command = command.into();
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

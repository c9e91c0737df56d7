//! Proxy runner port (interface).

use std::future::Future;

use crate::domain::PortSpec;
use crate::error::Result;

/// Port for starting the external reverse proxy.
///
/// Starting is split from waiting so a spawn failure is known before the
/// HTTP server accepts its first request.
pub trait ProxyRunnerPort: Send + Sync {
    /// Handle to a proxy that has been started.
    type Running: RunningProxyPort;

    /// Start the proxy with `front_port` and `app_port` as its two arguments.
    fn spawn(&self, spec: &PortSpec) -> Result<Self::Running>;
}

/// A started proxy process.
pub trait RunningProxyPort: Send + 'static {
    /// Wait for the proxy to exit and return its exit code.
    fn wait(self) -> impl Future<Output = Result<i32>> + Send;
}

//! Startup context tying the listener, the ports and the proxy together.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::application::ProxyLauncher;
use crate::config::ServerConfig;
use crate::domain::PortSpec;
use crate::error::{Error, Result};
use crate::ports::ProxyRunnerPort;
use crate::server;

/// How a running app came to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The shutdown signal fired; in-flight requests got a short grace period.
    ServerStopped,
    /// The proxy exited; the process must exit with this code.
    ProxyEnded(i32),
}

impl Termination {
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::ServerStopped => 0,
            Termination::ProxyEnded(code) => *code,
        }
    }
}

/// A bound test app, ready to serve.
///
/// Holds the listening socket and the resolved ports for the lifetime of the
/// process. Dropping it closes the listener.
#[derive(Debug)]
pub struct TestApp {
    spec: PortSpec,
    config: ServerConfig,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TestApp {
    /// Bind the app port on the configured host.
    pub async fn bind(spec: PortSpec, config: ServerConfig) -> Result<Self> {
        let addr = SocketAddr::new(config.host, spec.app_port());
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        Self::from_listener(spec, config, listener)
    }

    /// Wrap a listener that is already bound, e.g. on an ephemeral port.
    pub fn from_listener(
        spec: PortSpec,
        config: ServerConfig,
        listener: TcpListener,
    ) -> Result<Self> {
        let local_addr = listener.local_addr()?;
        info!(
            host = %local_addr.ip(),
            port = local_addr.port(),
            "Test app listening at http://{}",
            local_addr
        );
        Ok(Self {
            spec,
            config,
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves or, with an offset, until the proxy exits.
    ///
    /// The proxy is started after the listener is bound and before the first
    /// request is accepted, so a spawn failure means nothing was ever served.
    /// Once the proxy exits the server stops without draining and the exit
    /// code recorded by the launcher is returned.
    pub async fn run<R, F>(self, runner: R, shutdown: F) -> Result<Termination>
    where
        R: ProxyRunnerPort,
        F: Future<Output = ()> + Send + 'static,
    {
        let mut launcher = ProxyLauncher::new(runner);
        let running = launcher.start(&self.spec)?;

        let (fired_tx, fired_rx) = oneshot::channel();
        let signal = async move {
            shutdown.await;
            let _ = fired_tx.send(());
        };

        let app = server::router(self.config.data_file.clone());
        let serve = axum::serve(self.listener, app)
            .with_graceful_shutdown(signal)
            .into_future();
        let serve = drain_within(serve, fired_rx, self.config.shutdown_grace);

        if let Some(running) = running {
            tokio::select! {
                result = serve => result?,
                result = launcher.finish(running) => result?,
            }
        } else {
            serve.await?;
        }

        let state = launcher.state();
        if !state.is_terminal() {
            info!("Test app stopped");
            return Ok(Termination::ServerStopped);
        }

        state
            .exit_code()
            .map(Termination::ProxyEnded)
            .ok_or(Error::InvalidTransition {
                from: "failed",
                action: "exit",
            })
    }
}

/// Run `serve` to completion, but give up on open connections once
/// `grace` has passed after the shutdown signal.
///
/// `/statusTimeout` connections never finish on their own.
async fn drain_within<S>(serve: S, fired: oneshot::Receiver<()>, grace: Duration) -> Result<()>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => return Ok(result?),
        Ok(()) = fired => {}
    }

    match tokio::time::timeout(grace, serve).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(
                grace_ms = grace.as_millis() as u64,
                "Connections still open after shutdown, closing them"
            );
            Ok(())
        }
    }
}

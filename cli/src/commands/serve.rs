//! Serve command - bind the app port, launch the proxy if needed, serve.

use anyhow::{Context, Result};
use testapp_core::{CommandProxyRunner, PortSpec, ServerConfig, Termination, TestApp};
use tracing::{info, warn};

/// Run until Ctrl-C or until the proxy exits.
pub async fn run(spec: PortSpec, config: ServerConfig) -> Result<Termination> {
    let runner = CommandProxyRunner::new(&config.proxy_command);

    let app = TestApp::bind(spec, config)
        .await
        .context("failed to start test app")?;

    let termination = app
        .run(runner, shutdown_signal())
        .await
        .context("test app failed")?;

    info!(
        exit_code = termination.exit_code(),
        ?termination,
        "Test app finished"
    );
    Ok(termination)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

//! Proxy launch application service.

use tracing::{error, info};

use crate::domain::{LaunchState, PortSpec};
use crate::error::{Error, Result};
use crate::ports::{ProxyRunnerPort, RunningProxyPort};

/// Drives a [`ProxyRunnerPort`] through the [`LaunchState`] lifecycle.
///
/// At most one proxy is started per launcher.
pub struct ProxyLauncher<R: ProxyRunnerPort> {
    runner: R,
    state: LaunchState,
}

impl<R: ProxyRunnerPort> ProxyLauncher<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            state: LaunchState::Idle,
        }
    }

    pub fn state(&self) -> &LaunchState {
        &self.state
    }

    /// Start the proxy if `spec` has an offset.
    ///
    /// Returns `None` and stays idle when no proxy is needed. A spawn
    /// failure moves the launcher to `LaunchFailed` and is returned as-is.
    pub fn start(&mut self, spec: &PortSpec) -> Result<Option<R::Running>> {
        if !spec.needs_proxy() {
            return Ok(None);
        }

        self.state.launch()?;
        info!(
            front_port = spec.front_port(),
            app_port = spec.app_port(),
            "Launching proxy"
        );

        match self.runner.spawn(spec) {
            Ok(running) => Ok(Some(running)),
            Err(e) => {
                error!(error = %e, "Proxy launch failed");
                self.state.fail(e.to_string())?;
                Err(e)
            }
        }
    }

    /// Wait for a started proxy and record how it ended.
    ///
    /// On success the launcher is in `ProxyEnded` and [`LaunchState::exit_code`]
    /// holds the code the whole process must exit with.
    pub async fn finish(&mut self, running: R::Running) -> Result<()> {
        if self.state != LaunchState::Launching {
            return Err(Error::InvalidTransition {
                from: "not launching",
                action: "finish",
            });
        }

        match running.wait().await {
            Ok(code) => {
                info!(exit_code = code, "Proxy exited");
                self.state.end(code)
            }
            Err(e) => {
                error!(error = %e, "Lost track of proxy");
                self.state.fail(e.to_string())?;
                Err(e)
            }
        }
    }
}

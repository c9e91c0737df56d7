//! Reverse proxy launched as a child process.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::domain::PortSpec;
use crate::error::{Error, Result};
use crate::ports::{ProxyRunnerPort, RunningProxyPort};

/// Default proxy start script, relative to the working directory.
pub const DEFAULT_PROXY_COMMAND: &str = "./start-haproxy.sh";

/// Runs the proxy command as `<command> <front_port> <app_port>`.
///
/// The child inherits stdout and stderr so its output lands next to ours.
#[derive(Debug, Clone)]
pub struct CommandProxyRunner {
    command: PathBuf,
}

impl CommandProxyRunner {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for CommandProxyRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_COMMAND)
    }
}

impl ProxyRunnerPort for CommandProxyRunner {
    type Running = ProxyChild;

    fn spawn(&self, spec: &PortSpec) -> Result<ProxyChild> {
        let front_port = spec.front_port().to_string();
        let app_port = spec.app_port().to_string();

        debug!(
            command = %self.command.display(),
            front_port = %front_port,
            app_port = %app_port,
            "Starting proxy"
        );

        let child = Command::new(&self.command)
            .args([&front_port, &app_port])
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::ProxySpawn {
                command: self.command.display().to_string(),
                source,
            })?;

        debug!(pid = ?child.id(), "Proxy started");
        Ok(ProxyChild { child })
    }
}

/// A proxy child process.
#[derive(Debug)]
pub struct ProxyChild {
    child: Child,
}

impl RunningProxyPort for ProxyChild {
    async fn wait(mut self) -> Result<i32> {
        let status = self.child.wait().await.map_err(Error::ProxyWait)?;
        Ok(exit_code(status))
    }
}

/// Map an exit status to the code this process should exit with.
///
/// A proxy killed by a signal maps to `128 + signal` like a shell does.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            warn!(signal = signal, "Proxy terminated by signal");
            return 128 + signal;
        }
    }

    1
}

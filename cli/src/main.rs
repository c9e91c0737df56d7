//! testapp CLI - Upstream HTTP test app
//!
//! Serves canned routes on the app port and, when given a non-zero offset,
//! starts a reverse proxy from the front port to the app port. The process
//! exits with the proxy's exit code once the proxy ends.

mod commands;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use testapp_core::adapters::DEFAULT_PROXY_COMMAND;
use testapp_core::config::DEFAULT_DATA_FILE;
use testapp_core::{PortSpec, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "testapp")]
#[command(author, version, about = "Upstream HTTP test app with optional proxy bootstrap")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Externally advertised port
    front_port: String,

    /// Added to the front port to get the app port; non-zero starts the proxy
    #[arg(allow_hyphen_values = true)]
    offset: Option<String>,

    /// Address to bind the app port on
    #[arg(long, env = "TESTAPP_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// File served by GET /file
    #[arg(long, env = "TESTAPP_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Program started as `<command> <front_port> <app_port>`
    #[arg(long, env = "TESTAPP_PROXY_COMMAND", default_value = DEFAULT_PROXY_COMMAND)]
    proxy_command: PathBuf,

    /// Resolve and print the ports, then exit without binding
    #[arg(long)]
    check: bool,

    /// Output in JSON format (with --check)
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "TESTAPP_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig::new()
            .with_host(self.host)
            .with_data_file(&self.data_file)
            .with_proxy_command(&self.proxy_command)
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let spec = PortSpec::resolve(&cli.front_port, cli.offset.as_deref())?;

    if cli.check {
        return commands::check::run(&spec, cli.json);
    }

    let termination = commands::serve::run(spec, cli.server_config()).await?;
    match termination.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_port_only() {
        let cli = Cli::try_parse_from(["testapp", "8001"]).unwrap();
        assert_eq!(cli.front_port, "8001");
        assert_eq!(cli.offset, None);
        assert!(!cli.check);
    }

    #[test]
    fn test_parse_negative_offset() {
        let cli = Cli::try_parse_from(["testapp", "8020", "-20"]).unwrap();
        assert_eq!(cli.offset.as_deref(), Some("-20"));

        let spec = PortSpec::resolve(&cli.front_port, cli.offset.as_deref()).unwrap();
        assert_eq!(spec.app_port(), 8000);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "testapp",
            "--host",
            "127.0.0.1",
            "--data-file",
            "/tmp/payload",
            "--proxy-command",
            "/opt/proxy.sh",
            "8000",
            "20",
        ])
        .unwrap();

        let config = cli.server_config();
        assert!(config.host.is_loopback());
        assert_eq!(config.data_file, PathBuf::from("/tmp/payload"));
        assert_eq!(config.proxy_command, PathBuf::from("/opt/proxy.sh"));
    }

    #[test]
    fn test_hyphenated_offset_reaches_resolver() {
        let cli = Cli::try_parse_from(["testapp", "8000", "-x"]).unwrap();
        assert_eq!(cli.offset.as_deref(), Some("-x"));

        let spec = PortSpec::resolve(&cli.front_port, cli.offset.as_deref()).unwrap();
        assert_eq!(spec.offset(), 0);
        assert_eq!(spec.app_port(), 8000);
    }

    #[test]
    fn test_flags_after_front_port_still_parse() {
        let cli = Cli::try_parse_from(["testapp", "8000", "--check"]).unwrap();
        assert!(cli.check);
        assert_eq!(cli.offset, None);
    }

    #[test]
    fn test_front_port_required() {
        assert!(Cli::try_parse_from(["testapp"]).is_err());
    }
}

//! QLC+ HTTP bridge: entry point.
//!
//! This binary serves a small REST API and turns every call into a
//! request/response exchange over the QLC+ websocket API.
//!
//! # Usage
//!
//! ```text
//! qlc-http-bridge [OPTIONS]
//!
//! Options:
//!   --qlcplus      <HOST:PORT>  Address of the QLC+ websocket [default: localhost:9999]
//!   --http         <HOST:PORT>  Address for the HTTP API [default: localhost:8888]
//!   --timeout-secs <SECS>       Write/read deadline per exchange [default: 10]
//!   --config       <PATH>       Optional TOML configuration file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                | Description                    |
//! |-------------------------|--------------------------------|
//! | `QLCPLUS_ADDR`          | Address of the QLC+ websocket  |
//! | `QLCPLUS_HTTP_ADDR`     | Address for the HTTP API       |
//! | `QLCPLUS_TIMEOUT_SECS`  | Exchange deadline in seconds   |
//! | `QLCPLUS_BRIDGE_CONFIG` | Path of the TOML config file   |
//!
//! Precedence, highest first: command line, environment, config file,
//! built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qlc_http_bridge::domain::BridgeConfig;
use qlc_http_bridge::infrastructure::config_file::load_config;
use qlc_http_bridge::infrastructure::run_server;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// HTTP API for the QLC+ virtual console.
///
/// Values left unset fall back to the config file, then to the defaults.
#[derive(Debug, Parser)]
#[command(
    name = "qlc-http-bridge",
    about = "HTTP-to-websocket bridge for QLC+ virtual console widgets",
    version
)]
struct Cli {
    /// Address of the QLC+ websocket (host:port) [default: localhost:9999].
    #[arg(long, env = "QLCPLUS_ADDR")]
    qlcplus: Option<String>,

    /// Address for the HTTP API (host:port) [default: localhost:8888].
    #[arg(long, env = "QLCPLUS_HTTP_ADDR")]
    http: Option<String>,

    /// Deadline in seconds for each websocket write and read [default: 10].
    ///
    /// Setting a widget to the value it already has gets no reply from QLC+,
    /// so such a request takes this long to fail.
    #[arg(long, env = "QLCPLUS_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Optional TOML configuration file.
    #[arg(long, env = "QLCPLUS_BRIDGE_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Merges the config file (if any) and the CLI values into a validated
    /// [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the resulting configuration is invalid.
    fn into_bridge_config(self) -> anyhow::Result<BridgeConfig> {
        let mut config = BridgeConfig::default();

        if let Some(path) = &self.config {
            let file = load_config(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            config = file.apply_to(config);
        }

        if let Some(addr) = self.qlcplus {
            config.controller_addr = addr;
        }
        if let Some(addr) = self.http {
            config.http_bind_addr = addr;
        }
        if let Some(secs) = self.timeout_secs {
            config.exchange_timeout = Duration::from_secs(secs);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `RUST_LOG` controls verbosity; `info` when absent or invalid.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Cli::parse().into_bridge_config()?;

    run_server(config, shutdown_signal()).await?;

    info!("qlc-http-bridge stopped");
    Ok(())
}

/// Resolves when Ctrl+C (SIGINT on Unix) is received.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, initiating graceful shutdown"),
        Err(e) => {
            tracing::error!("failed to listen for Ctrl+C signal: {e}");
            // Without a signal handler, keep serving until the process is killed.
            std::future::pending::<()>().await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["qlc-http-bridge"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn bare() -> Cli {
        Cli {
            qlcplus: None,
            http: None,
            timeout_secs: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_qlcplus_override() {
        let cli = cli(&["--qlcplus", "10.0.0.5:9999"]);
        assert_eq!(cli.qlcplus.as_deref(), Some("10.0.0.5:9999"));
    }

    #[test]
    fn test_cli_timeout_override() {
        let cli = cli(&["--timeout-secs", "3"]);
        assert_eq!(cli.timeout_secs, Some(3));
    }

    #[test]
    fn test_cli_rejects_non_numeric_timeout() {
        let result = Cli::try_parse_from(["qlc-http-bridge", "--timeout-secs", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_bridge_config_without_values_uses_defaults() {
        // Arrange: build the struct directly so environment variables on the
        // test machine cannot leak in.
        let config = bare().into_bridge_config().unwrap();

        // Assert
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_into_bridge_config_applies_cli_values() {
        let config = Cli {
            qlcplus: Some("desk.local:9999".to_string()),
            http: Some("0.0.0.0:8080".to_string()),
            timeout_secs: Some(2),
            config: None,
        }
        .into_bridge_config()
        .unwrap();

        assert_eq!(config.controller_url(), "ws://desk.local:9999/qlcplusWS");
        assert_eq!(config.http_bind_addr, "0.0.0.0:8080");
        assert_eq!(config.exchange_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_into_bridge_config_cli_wins_over_file() {
        // Arrange: a config file naming one controller, the CLI another
        let file_name = format!("qlc-http-bridge-test-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(
            &path,
            "[bridge]\nqlcplus = \"file-host:9999\"\ntimeout_secs = 4\n",
        )
        .unwrap();
        let cli = Cli {
            qlcplus: Some("cli-host:9999".to_string()),
            config: Some(path.clone()),
            ..bare()
        };

        // Act
        let config = cli.into_bridge_config().unwrap();
        std::fs::remove_file(&path).ok();

        // Assert: CLI value for the address, file value for the timeout
        assert_eq!(config.controller_addr, "cli-host:9999");
        assert_eq!(config.exchange_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_into_bridge_config_missing_file_is_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/bridge.toml")),
            ..bare()
        };
        assert!(cli.into_bridge_config().is_err());
    }

    #[test]
    fn test_into_bridge_config_zero_timeout_is_error() {
        let cli = Cli {
            timeout_secs: Some(0),
            ..bare()
        };
        assert!(cli.into_bridge_config().is_err());
    }
}

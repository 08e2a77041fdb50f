//! Address Utility server
//!
//! Reads configuration from a TOML file (~/.config/address-utility/config.toml),
//! applies environment overrides and serves the REST API until SIGINT/SIGTERM.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use address_utility::server::{check_config, init_tracing, ServerHandle, ServerOptions};
use address_utility::{default_config_path, AppConfig};

#[derive(Debug, Parser)]
#[command(name = "address-utility", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "ADDRESS_UTILITY_CONFIG")]
    config: Option<PathBuf>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Override `logging.level` (RUST_LOG still wins)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = app_cfg.apply_env_overrides() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    if let Some(port) = cli.port {
        app_cfg.server.port = port;
    }
    if let Some(level) = cli.log_level {
        app_cfg.logging.level = level;
    }

    if let Err(e) = init_tracing(&app_cfg.logging) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    info!("Configuration loaded from {}", config_path.display());

    if let Err(e) = check_config(&app_cfg) {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    if cli.check {
        info!("Configuration OK");
        return ExitCode::SUCCESS;
    }

    let handle = match ServerHandle::start(ServerOptions {
        config: app_cfg,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Press Ctrl+C to shutdown gracefully.");
    handle.install_signal_handler();
    handle.wait().await;
    ExitCode::SUCCESS
}

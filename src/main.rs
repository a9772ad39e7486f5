//! Work Scheduler: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/work-scheduler/config.toml)
//! JWT_SECRET=change-me work-scheduler
//!
//! # Custom config path and port
//! work-scheduler --config /etc/work-scheduler/config.toml --port 8080
//!
//! # Validate config without starting
//! work-scheduler --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use work_scheduler::config::{default_config_path, AppConfig};
use work_scheduler::server::{init_tracing, ServerHandle, ServerOptions};

/// Personal work-hours schedule and time-off service.
#[derive(Parser, Debug)]
#[command(
    name = "work-scheduler",
    version,
    about = "Work-hours schedule and time-off REST API",
    long_about = "REST API for a personal weekly work schedule and time-off requests.\n\n\
                  Default config: ~/.config/work-scheduler/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SCHEDULER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&AppConfig::default());
            error!("{}", e);
            return Err(e.into());
        }
    };
    config.apply_env_overrides()?;

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

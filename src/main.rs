//! Module host (v1)
//!
//! Activates the configured modules and serves the pipeline they build.
//!
//! # Architecture Overview
//!
//! ```text
//!   module-host.toml
//!         │
//!         ▼
//!   ┌───────────┐    ┌───────────────┐    ┌───────────────────────────────┐
//!   │  config   │───▶│ ModuleHost    │───▶│ resolver: dependency order,   │
//!   │ + logging │    │ (catalog)     │    │ cycle check, construct once   │
//!   └───────────┘    └───────────────┘    └──────────────┬────────────────┘
//!                                                        │
//!                                                        ▼
//!                          ┌───────────────────────────────────────────────┐
//!                          │ Phase A: configure_services (all modules)     │
//!                          │ Phase B: configure          (all modules)     │
//!                          └──────────────────────┬────────────────────────┘
//!                                                 │ Router
//!                                                 ▼
//!                          ┌───────────────────────────────────────────────┐
//!                          │ HttpServer: timeout, bind, graceful shutdown  │
//!                          └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use module_host::config::{load_config, Environment, HostConfig};
use module_host::lifecycle::{signals, ModuleHost, Shutdown};
use module_host::modules::builtin_catalog;
use module_host::observability::{logging, metrics};
use module_host::{HttpServer, ServiceCollection};

#[derive(Parser)]
#[command(name = "module-host")]
#[command(about = "Activate application modules and serve their pipeline", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "MODULE_HOST_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("module-host v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = %config.environment.name,
        modules = ?config.modules.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let host = ModuleHost::new(builtin_catalog()?, Environment::from(&config.environment));

    let mut services = ServiceCollection::new();
    services.add_singleton(Arc::new(config.modules.clone()));
    services.add_singleton(Arc::new(config.clone()));

    let activation = match host.activate_with(config.modules.enabled.as_slice(), services) {
        Ok(activation) => activation,
        Err(e) => {
            tracing::error!(error = %e, "Module activation failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        modules = activation.order.len(),
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(activation.router, &config);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Storefront server entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │   HTTP   │───▶│ Handlers │───▶│ Services │───▶│  Store   │
//! │  (axum)  │    │          │    │ (orders) │    │(mem / pg)│
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Flags: `--env <name>` (or `-e`, default `dev`) selects `config/<name>.yaml`,
//! `--port <n>` overrides the listen port.

use std::sync::Arc;

use storefront::config::AppConfig;
use storefront::gateway::state::AppState;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let log_guard = storefront::logging::init_logging(&app_config);

    tracing::info!(
        "Starting storefront {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let store = match storefront::store::connect(&app_config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("❌ FATAL: Failed to connect to document store: {:#}", e);
            drop(log_guard);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to {} document store", store.name());

    let state = Arc::new(AppState::from_config(store, &app_config));
    let result = storefront::gateway::run_server(&app_config.gateway, state).await;
    if let Err(e) = &result {
        tracing::error!("❌ FATAL: {:#}", e);
    }
    drop(log_guard);
    result
}

//! # switchboardd — switchboard daemon
//!
//! Composition root that wires the device registry, vendor adapters and
//! dispatch engine together and serves the webhook.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env var overrides)
//! - Initialize tracing
//! - Build the read-only device registry
//! - Construct the vendor adapters and the dispatch engine
//! - Build the axum router and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no dispatch logic belongs here.

mod config;

use switchboard_adapter_govee::GoveeAdapter;
use switchboard_adapter_http_axum::state::AppState;
use switchboard_adapter_lifx::LifxAdapter;
use switchboard_adapter_wyze::WyzeAdapter;
use switchboard_app::engine::{DebugOptions, DispatchEngine};
use switchboard_app::registry::DeviceRegistry;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let registry = DeviceRegistry::from_descriptors(config.devices.clone())?;
    tracing::info!(devices = registry.len(), "registry loaded");

    let engine = DispatchEngine::new(
        registry,
        LifxAdapter::new(config.vendors.lifx_api_key.as_str()),
        GoveeAdapter::new(config.vendors.govee_api_key.as_str()),
        WyzeAdapter::new(config.vendors.wyze_webhook_url.as_str()),
        DebugOptions {
            enabled: config.debug.email_enabled,
            recipient: config.debug.recipient.clone(),
        },
    );

    let app = switchboard_adapter_http_axum::router::build(AppState::new(engine));

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "switchboardd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

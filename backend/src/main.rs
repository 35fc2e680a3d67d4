//! Backend entry-point: loads settings, wires adapters, and serves the API.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use devhub::config::ServerSettings;
use devhub::inbound::http::health::HealthState;
use devhub::server::create_server;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &settings, Arc::new(DefaultClock))?;
    info!(host = %settings.host(), port = settings.port(), "listening");

    health_state.mark_ready();
    let result = server.await;
    health_state.mark_unhealthy();
    result
}

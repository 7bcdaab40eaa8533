use crate::config::Config;
use crate::router::serve_request;
use crate::state::AppState;
use anyhow::Context;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod comps;
mod config;
mod errors;
mod responses;
mod router;
mod routes;
mod state;
mod usage;


fn main() -> anyhow::Result<()> {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rentcomps=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    if config.listings.api_key.is_none() {
        tracing::warn!("RAPIDAPI_KEY is not set; /api/rent-comps will answer 500");
    }
    if config.admin_key.is_none() {
        tracing::warn!("ADMIN_KEY is not set; usage listing is disabled");
    }

    let state = AppState::new(&config).context("Failed to build application state")?;
    tracing::info!(path = %state.usage.path().display(), "usage log");

    // 3️⃣ Start the server
    tracing::info!(addr = %config.bind_addr, workers = config.max_workers, "Starting server");
    let server = Server::bind(config.bind_addr).max_workers(config.max_workers);

    // 4️⃣ Serve requests, passing state into closure
    server
        .serve(move |req: astra::Request, _info| serve_request(req, &state))
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}

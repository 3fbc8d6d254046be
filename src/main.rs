mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::relay::{AcceptRelay, HttpRelay, RelayConfig, ReportRelay};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Relay config is non-fatal: without an authority endpoint reports
    // are accepted locally and kept in the log only.
    let relay: Arc<dyn ReportRelay> = match RelayConfig::from_env() {
        Some(config) => {
            tracing::info!(url = %config.authority_url, "forwarding reports to authority endpoint");
            Arc::new(HttpRelay::new(config).expect("relay client init failed"))
        }
        None => {
            tracing::warn!("AUTHORITY_URL not set — reports accepted locally only");
            Arc::new(AcceptRelay)
        }
    };

    let map = state::MapConfig::from_env();
    if map.is_none() {
        tracing::warn!("map provider not configured — map view disabled");
    }

    let state = state::AppState::new(relay, map);
    services::directory::seed(&state).await;

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "argus listening");
    axum::serve(listener, app).await.expect("server failed");
}

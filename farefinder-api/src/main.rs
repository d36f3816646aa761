use std::net::SocketAddr;

use farefinder_api::{app, AppState};
use farefinder_catalog::sample_catalog;
use farefinder_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farefinder_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting FareFinder API on port {}", config.server.port);

    let today = chrono::Local::now().date_naive();
    let catalog = sample_catalog(today);
    tracing::info!("Seeded {} sample flights from {}", catalog.flight_count(), today);

    let app = app(AppState::new(catalog, config.catalog.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

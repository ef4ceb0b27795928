//! Smart Helmet Dashboard server

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helmet_dashboard::{
    routes, AppState, ClientStorage, Config, InMemoryClientStorage, SqliteClientStorage,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "helmet_dashboard=debug,helmet_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    match config.database_path.clone() {
        Some(path) => {
            tracing::info!(%path, "Using SQLite storage");
            serve(SqliteClientStorage::open(&path)?, config).await
        }
        None => {
            tracing::info!("Using in-memory storage");
            serve(InMemoryClientStorage::new(), config).await
        }
    }
}

async fn serve<S: ClientStorage + 'static>(storage: S, config: Config) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(storage, config)?);
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

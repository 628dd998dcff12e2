// src/main.rs

use manpower_api::{
    config::Config,
    router,
    store::{PgStore, ScenarioStore},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let store = match &config.database_url {
        Some(url) => ScenarioStore::Postgres(PgStore::connect(url, config.db_max_connections).await?),
        None => {
            info!("DATABASE_URL not set, keeping scenarios in memory");
            ScenarioStore::in_memory()
        }
    };
    let state = AppState { store };

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, store = state.store.backend(), "API listening");

    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

//! Server binary: wires config, database, migrations, and the router.

use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use darkroom::blob::{HttpBlobStore, NoopBlobStore};
use darkroom::blob::BlobStore;
use darkroom::clock::Clock;
use darkroom::config::AppConfig;
use darkroom::http::AppState;
use darkroom::migration::Migrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    dotenv().ok();
    let config = AppConfig::from_env()?;

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    let db = Database::connect(opt).await?;
    info!("connected to database");

    Migrator::up(&db, None).await?;

    let blob: Arc<dyn BlobStore> = match config.blob.clone() {
        Some(blob_config) => Arc::new(HttpBlobStore::new(blob_config)),
        None => {
            info!("no blob service configured, blob deletes become no-ops");
            Arc::new(NoopBlobStore)
        }
    };

    let state = Arc::new(AppState::new(
        db,
        config.auth.clone(),
        blob,
        Clock::system(),
        config.cookie_secure,
    ));

    let app = darkroom::http::router(state);

    info!("server starting on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

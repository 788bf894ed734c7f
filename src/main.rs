use std::net::SocketAddr;
use std::sync::Arc;

use listings_backend::{
    config::{get_config, init_config, LogFormat},
    database::{pool::pool_from_config, ListingStore, MemoryListingStore, PgListingStore},
    routes::build_router,
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "listings_backend=info,tower_http=info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    let store: Arc<dyn ListingStore> = match pool_from_config(config).await? {
        Some(pool) => {
            let store = PgListingStore::new(pool);
            store.migrate().await?;
            info!("Using Postgres listing store");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, listings are kept in memory only");
            Arc::new(MemoryListingStore::new())
        }
    };

    let app = build_router(AppState::new(store, config.jwt_secret.clone()), config.api_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

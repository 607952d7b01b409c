use std::sync::Arc;

use storefront::app::{AppState, Stores, build_router};
use storefront::core::auth::{JwtConfig, PasswordHasher};
use storefront::core::catalog::sample_products;
use storefront::core::clock::SystemClock;
use storefront::core::config::Config;
use storefront::core::db::connect;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load application config from environment variables
    let config = Config::from_env()?;

    // Log config status (without revealing secrets)
    tracing::info!(
        "Config loaded: database={}, jwt_secret={}, bcrypt_cost={}, token_ttl_hours={}",
        config.has_database(),
        config.has_jwt_secret(),
        config.bcrypt_cost,
        config.token_ttl_hours
    );

    if !config.has_jwt_secret() {
        tracing::warn!("JWT_SECRET_KEY not set, using the development signing key");
    }
    let jwt_config = JwtConfig::new(config.jwt_secret_or_dev()?).token_ttl(config.token_ttl_hours);

    let stores = match config.db_config() {
        Some(db_config) => Stores::postgres(connect(&db_config).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            Stores::in_memory()
        }
    };

    let state = AppState::new(
        stores,
        jwt_config,
        PasswordHasher::new(config.bcrypt_cost),
        Arc::new(SystemClock),
    )?;

    if config.seed_catalog {
        state.catalog_service.seed(sample_products()).await?;
    }

    let app = build_router(state);

    tracing::info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

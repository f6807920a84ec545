use std::sync::Arc;
use std::time::Duration;

use jb_reco::{
    api::{create_router, AppState},
    cache::CatalogCache,
    config::Config,
    services::providers::ShopifyClient,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jb_reco=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let missing = config.missing_settings();
    if !missing.is_empty() {
        tracing::warn!(
            missing = ?missing,
            "Storefront settings missing; catalog requests will fail until they are set"
        );
    }

    let mut client = ShopifyClient::new(
        config.shop_domain.clone().unwrap_or_default(),
        config.shop_access_token.clone().unwrap_or_default(),
        &config.shop_api_version,
    );
    if let Some(api_url) = config.shop_api_url.clone() {
        client = client.with_api_url(api_url);
    }

    let cache = CatalogCache::new(Duration::from_secs(config.catalog_ttl_secs));
    let state = AppState::new(Arc::new(client), cache);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

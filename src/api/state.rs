use std::sync::Arc;

use crate::cache::CatalogCache;
use crate::services::{providers::StorefrontClient, CatalogLoader};

/// Shared application state
///
/// Cheap to clone: the loader holds the storefront client and the catalog cache
/// behind `Arc`s, so every request sees the same cache.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogLoader,
}

impl AppState {
    /// Creates the state around a storefront client and an empty cache
    pub fn new(client: Arc<dyn StorefrontClient>, cache: CatalogCache) -> Self {
        Self {
            catalog: CatalogLoader::new(client, cache),
        }
    }
}

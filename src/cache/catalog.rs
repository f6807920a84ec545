use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::time::Instant;

use crate::models::CatalogItem;

/// Default time a loaded catalog is served before refreshing
pub const CATALOG_TTL: Duration = Duration::from_secs(15 * 60);

/// A complete catalog load and when it happened
struct CacheEntry {
    items: Arc<Vec<CatalogItem>>,
    loaded_at: Instant,
    fetched_at: DateTime<Utc>,
}

/// In-memory catalog cache with a time-based expiry
///
/// Owned by the application state and shared between requests. Readers clone an
/// `Arc` of the item list, so a refresh replaces the whole list at once and a
/// reader never observes a partially built catalog.
#[derive(Clone)]
pub struct CatalogCache {
    entry: Arc<RwLock<Option<CacheEntry>>>,
    refresh: Arc<Mutex<()>>,
    ttl: Duration,
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(CATALOG_TTL)
    }
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
            ttl,
        }
    }

    /// Returns the cached items if they are younger than the TTL and not empty
    pub async fn get_fresh(&self) -> Option<Arc<Vec<CatalogItem>>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.loaded_at.elapsed() < self.ttl && !e.items.is_empty())
            .map(|e| Arc::clone(&e.items))
    }

    /// Serializes refreshes so concurrent stale readers trigger a single upstream load
    pub async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh.lock().await
    }

    /// Publishes a freshly loaded catalog
    pub async fn replace(&self, items: Arc<Vec<CatalogItem>>) {
        let count = items.len();
        let mut entry = self.entry.write().await;
        *entry = Some(CacheEntry {
            items,
            loaded_at: Instant::now(),
            fetched_at: Utc::now(),
        });

        tracing::debug!(items = count, "Catalog cache replaced");
    }

    /// Wall-clock time of the last successful load, if any
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.fetched_at)
    }
}

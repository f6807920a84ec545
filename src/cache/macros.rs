/// A macro to simplify time-based caching of a loaded value.
///
/// This macro returns the cached value while it is fresh.
/// Otherwise it takes the cache's refresh guard, checks again (another request
/// may have refreshed while this one waited), and only then executes the
/// provided block, stores its result and returns it.
///
/// An error from the block is returned as is and leaves the cache untouched.
///
/// # Arguments
/// * `$cache`: The cache instance. It must have `get_fresh`, `refresh_guard`
///   and `replace` methods.
/// * `$block`: The future computing the value if the cache is stale.
///
/// # Example
/// ```rust,ignore
/// let items = cached!(self.cache, async move {
///     // Compute the value if the cache is stale
///     fetch_everything().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_fresh().await {
            Ok(cached)
        } else {
            let _refresh = $cache.refresh_guard().await;
            if let Some(cached) = $cache.get_fresh().await {
                Ok(cached)
            } else {
                // If stale, execute the block to compute the value
                let value = ::std::sync::Arc::new($block.await?);
                // Publish it for subsequent requests
                $cache.replace(value.clone()).await;
                Ok(value)
            }
        }
    }};
}

/// Storefront data provider abstraction
///
/// The catalog loader only needs one operation from the e-commerce platform:
/// fetching a page of products. Keeping it behind a trait lets the loader run
/// against the real GraphQL API in production and against fakes in tests.
use crate::{error::AppResult, models::ProductConnection};

pub mod shopify;

pub use shopify::ShopifyClient;

/// Trait for storefront product sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StorefrontClient: Send + Sync {
    /// Fetch one page of non-archived products
    ///
    /// `after` is the cursor of the last edge of the previous page, `None` for the
    /// first page.
    async fn fetch_products(&self, first: u32, after: Option<String>)
        -> AppResult<ProductConnection>;

    /// Public domain of the shop, used to build product and image URLs
    fn shop_domain(&self) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

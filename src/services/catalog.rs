//! Catalog loading: paging through the storefront, normalizing products and
//! caching the result for the configured TTL.

use crate::{
    cache::CatalogCache,
    cached,
    error::AppResult,
    models::{CatalogItem, PriceBand, RawProduct},
    services::{providers::StorefrontClient, text},
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Largest page the storefront API serves
pub const PAGE_SIZE: u32 = 100;

const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Clone)]
pub struct CatalogLoader {
    client: Arc<dyn StorefrontClient>,
    cache: CatalogCache,
}

impl CatalogLoader {
    pub fn new(client: Arc<dyn StorefrontClient>, cache: CatalogCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Returns the catalog, from cache while fresh, otherwise from the storefront
    ///
    /// A failed load leaves the previous cache content in place.
    pub async fn load_catalog(&self) -> AppResult<Arc<Vec<CatalogItem>>> {
        cached!(self.cache, async {
            let items = self.fetch_all().await?;

            tracing::info!(
                items = items.len(),
                provider = self.client.name(),
                "Catalog loaded from storefront"
            );

            AppResult::Ok(items)
        })
    }

    /// Pages through every product, in the order the storefront returns them
    async fn fetch_all(&self) -> AppResult<Vec<CatalogItem>> {
        let shop_domain = self.client.shop_domain();
        let mut items = Vec::new();
        let mut after: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.client.fetch_products(PAGE_SIZE, after.take()).await?;
            pages += 1;

            let currency = page.currency_code.as_deref().unwrap_or(DEFAULT_CURRENCY);
            let last_cursor = page.edges.last().map(|edge| edge.cursor.clone());
            items.extend(
                page.edges
                    .iter()
                    .map(|edge| normalize_product(&edge.node, &shop_domain, currency)),
            );

            if !page.page_info.has_next_page {
                break;
            }

            match last_cursor {
                Some(cursor) => after = Some(cursor),
                None => {
                    tracing::warn!(pages, "Storefront reported a next page without edges");
                    break;
                }
            }
        }

        tracing::debug!(pages, items = items.len(), "Storefront paging finished");
        Ok(items)
    }
}

/// Converts one storefront product into a catalog item
pub fn normalize_product(raw: &RawProduct, shop_domain: &str, shop_currency: &str) -> CatalogItem {
    let description = raw
        .description_html
        .as_deref()
        .map(text::strip_markup)
        .unwrap_or_default();
    let notes = text::extract_notes(&description);
    let brand = raw.vendor.clone().unwrap_or_default();
    let tags = raw.tags.join(" ");

    let searchable = [
        raw.title.as_str(),
        brand.as_str(),
        raw.product_type.as_deref().unwrap_or_default(),
        tags.as_str(),
        description.as_str(),
    ]
    .join(" ");
    let gender = text::infer_gender(&text::normalize(&searchable));

    let variant = raw.variants.first();
    let price = variant
        .and_then(|v| v.price.as_ref())
        .map(|p| p.amount())
        .filter(|amount| !amount.is_sign_negative())
        .unwrap_or(Decimal::ZERO);
    let currency = variant
        .and_then(|v| v.price.as_ref())
        .and_then(|p| p.currency_code())
        .unwrap_or(shop_currency)
        .to_string();

    let image = raw
        .images
        .first()
        .map(|img| img.url.clone())
        .unwrap_or_else(|| format!("https://{}/cdn/shop/products/{}.jpg", shop_domain, raw.handle));

    CatalogItem {
        id: raw.id.clone(),
        handle: raw.handle.clone(),
        title: raw.title.clone(),
        brand,
        gender,
        notes_top: notes.top,
        notes_heart: notes.heart,
        notes_base: notes.base,
        price,
        price_band: PriceBand::from_price(price),
        currency,
        image,
        url: format!("https://{}/products/{}", shop_domain, raw.handle),
        variant_id: variant.map(|v| v.id.clone()).unwrap_or_default(),
    }
}

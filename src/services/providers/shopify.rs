/// Shopify GraphQL provider
///
/// Lists products through the versioned GraphQL endpoint:
/// `POST https://{shop}/admin/api/{version}/graphql.json`.
///
/// The same token is sent under both the admin and the storefront header names so
/// that either kind of token is accepted without extra configuration.
use crate::{
    error::{AppError, AppResult},
    models::{
        storefront::{GraphQlRequest, GraphQlResponse, ProductsData},
        ProductConnection,
    },
    services::providers::StorefrontClient,
};
use reqwest::Client as HttpClient;
use serde::Serialize;

const ADMIN_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

const PRODUCTS_QUERY: &str = r#"
query Products($first: Int!, $after: String) {
  shop { currencyCode }
  products(first: $first, after: $after, query: "-status:archived") {
    edges {
      cursor
      node {
        id
        handle
        title
        vendor
        productType
        tags
        descriptionHtml
        images(first: 1) { edges { node { url } } }
        variants(first: 1) { edges { node { id price } } }
      }
    }
    pageInfo { hasNextPage }
  }
}
"#;

#[derive(Debug, Serialize)]
struct ProductsVariables {
    first: u32,
    after: Option<String>,
}

#[derive(Clone)]
pub struct ShopifyClient {
    http_client: HttpClient,
    shop_domain: String,
    access_token: String,
    api_url: String,
}

impl ShopifyClient {
    pub fn new(shop_domain: String, access_token: String, api_version: &str) -> Self {
        let shop_domain = shop_domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        let api_url = format!("https://{}/admin/api/{}/graphql.json", shop_domain, api_version);

        Self {
            http_client: HttpClient::new(),
            shop_domain,
            access_token,
            api_url,
        }
    }

    /// Points the client at a different endpoint, e.g. a local stub server
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Unwraps a GraphQL envelope, treating an `errors` array as a failure
    fn into_products(response: GraphQlResponse<ProductsData>) -> AppResult<ProductConnection> {
        if !response.errors.is_empty() {
            let messages = response.errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::GraphQl(messages));
        }

        let data = response.data.ok_or_else(|| {
            AppError::Upstream("GraphQL response carried neither data nor errors".to_string())
        })?;

        let mut products = data.products;
        products.currency_code = data.shop.and_then(|shop| shop.currency_code);
        Ok(products)
    }
}

#[async_trait::async_trait]
impl StorefrontClient for ShopifyClient {
    async fn fetch_products(
        &self,
        first: u32,
        after: Option<String>,
    ) -> AppResult<ProductConnection> {
        if self.shop_domain.is_empty() || self.access_token.trim().is_empty() {
            return Err(AppError::Upstream("storefront not configured".to_string()));
        }

        let body = GraphQlRequest {
            query: PRODUCTS_QUERY,
            variables: ProductsVariables { first, after },
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .header(ADMIN_TOKEN_HEADER, &self.access_token)
            .header(STOREFRONT_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Storefront API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let envelope: GraphQlResponse<ProductsData> = serde_json::from_str(&response_text)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize storefront response"
                );
                AppError::Upstream(format!("Failed to parse storefront response: {}", e))
            })?;

        let products = Self::into_products(envelope)?;

        tracing::debug!(
            products = products.edges.len(),
            has_next_page = products.page_info.has_next_page,
            provider = "shopify",
            "Product page fetched"
        );

        Ok(products)
    }

    fn shop_domain(&self) -> String {
        self.shop_domain.clone()
    }

    fn name(&self) -> &'static str {
        "shopify"
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Storefront GraphQL wire types
// ============================================================================

/// Envelope of every GraphQL response
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Request body sent to the GraphQL endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// `data` payload of the products query
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub shop: Option<ShopInfo>,
    pub products: ProductConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInfo {
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// One page of products plus the data needed to request the next one
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default)]
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
    /// Shop currency, copied from the enclosing response by the client
    #[serde(skip)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEdge {
    pub cursor: String,
    pub node: RawProduct,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
}

/// Product record as returned by the storefront, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description_html: Option<String>,
    #[serde(default)]
    pub images: Connection<RawImage>,
    #[serde(default)]
    pub variants: Connection<RawVariant>,
}

/// Generic `{ edges: [{ node }] }` wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|edge| &edge.node)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    pub id: String,
    #[serde(default)]
    pub price: Option<RawPrice>,
}

/// Variant price: a bare amount string or a money object with its currency
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    #[serde(rename_all = "camelCase")]
    Money {
        amount: Decimal,
        #[serde(default)]
        currency_code: Option<String>,
    },
    Amount(Decimal),
}

impl RawPrice {
    pub fn amount(&self) -> Decimal {
        match self {
            RawPrice::Money { amount, .. } | RawPrice::Amount(amount) => *amount,
        }
    }

    pub fn currency_code(&self) -> Option<&str> {
        match self {
            RawPrice::Money { currency_code, .. } => currency_code.as_deref(),
            RawPrice::Amount(_) => None,
        }
    }
}

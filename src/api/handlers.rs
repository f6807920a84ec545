use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Answers, CatalogItem, Recommendation},
    services::recommendations::{self, DEFAULT_LIMIT},
};

use super::AppState;

/// Largest `limit` a caller may ask for
pub const MAX_LIMIT: usize = 20;

/// Items shown by the debug endpoint
const DEBUG_SAMPLE_SIZE: usize = 3;

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    /// URL-encoded JSON answers
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl RecommendQuery {
    /// Requested result size, clamped to `1..=MAX_LIMIT`; unparsable values fall back to the default
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(|n| n.clamp(1, MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub items: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub count: usize,
    pub sample: Vec<CatalogItem>,
    pub fetched_at: Option<DateTime<Utc>>,
}

// Handlers

/// Liveness probe
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Scores the catalog against the questionnaire answers in `q`
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendQuery>, QueryRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(
                request_id = %request_id,
                error = %rejection,
                "Ignoring malformed query string"
            );
            RecommendQuery::default()
        }
    };
    let answers = Answers::from_query(query.q.as_deref());
    let limit = query.limit();

    tracing::info!(
        request_id = %request_id,
        limit,
        answers = ?answers,
        "Processing recommendation request"
    );

    let catalog = state.catalog.load_catalog().await?;
    let items = recommendations::recommend(&catalog, &answers, limit);

    tracing::info!(
        request_id = %request_id,
        catalog_size = catalog.len(),
        returned = items.len(),
        "Recommendations computed"
    );

    Ok(Json(RecommendResponse { items }))
}

/// Summary of the cached catalog for troubleshooting
pub async fn debug_catalog(State(state): State<AppState>) -> AppResult<Json<DebugResponse>> {
    let catalog = state.catalog.load_catalog().await?;

    Ok(Json(DebugResponse {
        count: catalog.len(),
        sample: catalog.iter().take(DEBUG_SAMPLE_SIZE).cloned().collect(),
        fetched_at: state.catalog.cache().fetched_at().await,
    }))
}

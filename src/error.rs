use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        // Every failure surfaces the same shape; callers only need to know it broke.
        let body = Json(json!({
            "error": "server_error",
            "detail": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_display_joins_messages() {
        let err = AppError::GraphQl(vec!["Throttled".to_string(), "Bad cursor".to_string()]);
        assert_eq!(err.to_string(), "GraphQL errors: Throttled; Bad cursor");
    }

    #[tokio::test]
    async fn test_error_response_is_server_error() {
        let response = AppError::Upstream("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "server_error");
        assert_eq!(body["detail"], "Upstream API error: boom");
    }
}

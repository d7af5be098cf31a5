use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors from the HTTP transport layer
#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Client(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Errors that can occur when querying the upstream directory service
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to reach directory service at {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("Directory service returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode directory response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid directory URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No podcast found for id {id}")]
    NotFound { id: String },
}

/// Handler-level errors, mapped to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error(transparent)]
    Upstream(#[from] DirectoryError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream(DirectoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Upstream(DirectoryError::InvalidUrl(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_maps_to_bad_request() {
        let error = ApiError::MissingParameter { name: "query" };
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Missing required parameter 'query'");
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError::Upstream(DirectoryError::NotFound {
            id: "1234".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let status = ApiError::Upstream(DirectoryError::Status {
            url: "https://example.com/search".to_string(),
            status: 503,
        });
        assert_eq!(status.status_code(), StatusCode::BAD_GATEWAY);

        let transport = ApiError::Upstream(DirectoryError::RequestFailed {
            url: "https://example.com/search".to_string(),
            source: HttpError::Connection("refused".to_string()),
        });
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);
    }
}

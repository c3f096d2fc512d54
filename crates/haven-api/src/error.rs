//! API error types and HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use haven_arena::ArenaError;
use haven_stats::StatsError;

/// API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or unrecognized request input.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Arena(#[from] ArenaError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Arena(err) => arena_status(err),
            ApiError::Stats(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Status mapping for arena errors, shared with the move handler's
/// `success=false` body.
pub(crate) fn arena_status(err: &ArenaError) -> StatusCode {
    match err {
        ArenaError::GameNotFound => StatusCode::NOT_FOUND,
        ArenaError::GameNotActive
        | ArenaError::NotYourTurn
        | ArenaError::PositionTaken(_) => StatusCode::CONFLICT,
        ArenaError::NotAPlayer => StatusCode::FORBIDDEN,
        ArenaError::PositionOutOfRange(_) => StatusCode::BAD_REQUEST,
        ArenaError::Store(_) | ArenaError::Codec(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            haven_metrics::record_store_error();
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_4xx() {
        assert_eq!(
            ApiError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Arena(ArenaError::GameNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Arena(ArenaError::NotYourTurn).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn store_errors_are_5xx() {
        let err = ApiError::Arena(ArenaError::Store(
            haven_store::StoreError::Backend("down".into()),
        ));
        assert!(err.status().is_server_error());
    }
}

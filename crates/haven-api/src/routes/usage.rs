//! Chat quota endpoints.

use axum::Json;
use axum::extract::{Query, State};
use haven_core::Plan;
use haven_quota::QuotaStatus;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub(crate) struct UsageQuery {
    user_id: String,
    /// Plan override; falls back to the user's profile, then to free.
    plan: Option<String>,
}

/// `GET /usage` — today's quota standing for a user.
pub(crate) async fn check(
    State(state): State<AppState>,
    Query(q): Query<UsageQuery>,
) -> Result<Json<QuotaStatus>, ApiError> {
    haven_metrics::record_request("usage");

    let plan = match &q.plan {
        Some(raw) => raw
            .parse::<Plan>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state
            .profiles
            .plan(&q.user_id)
            .await
            .unwrap_or(Plan::Free),
    };

    let status = state.quota.check(&q.user_id, plan).await;
    if !status.allowed {
        haven_metrics::record_quota_denied();
    }
    Ok(Json(status))
}

#[derive(Deserialize)]
pub(crate) struct RecordBody {
    user_id: String,
}

#[derive(Serialize)]
pub(crate) struct RecordResponse {
    /// New count for today; `None` when the store write was lost (the quota
    /// is soft, so the message itself still went through).
    count: Option<u64>,
}

/// `POST /usage/record` — count one sent chat message.
pub(crate) async fn record(
    State(state): State<AppState>,
    Json(body): Json<RecordBody>,
) -> Json<RecordResponse> {
    haven_metrics::record_request("usage_record");
    haven_metrics::record_chat_message();

    let count = state.quota.record_message(&body.user_id).await;
    Json(RecordResponse { count })
}

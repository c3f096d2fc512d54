//! Matchmaking and game-session endpoints.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use haven_arena::{GameSession, GameType};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, arena_status};
use crate::state::AppState;

fn parse_game_type(raw: &str) -> Result<GameType, ApiError> {
    raw.parse::<GameType>().map_err(ApiError::BadRequest)
}

#[derive(Deserialize)]
pub(crate) struct MatchmakingBody {
    user_id: String,
    username: Option<String>,
    game_type: String,
    /// "join" (default) or "leave".
    action: Option<String>,
}

#[derive(Serialize)]
struct LeaveResponse {
    left: bool,
}

/// `POST /games/matchmaking` — join or leave a waiting list.
pub(crate) async fn matchmaking(
    State(state): State<AppState>,
    Json(body): Json<MatchmakingBody>,
) -> Result<Response, ApiError> {
    haven_metrics::record_request("matchmaking");
    let game_type = parse_game_type(&body.game_type)?;

    match body.action.as_deref() {
        Some("leave") => {
            state.arena.leave(&body.user_id, game_type).await?;
            Ok(Json(LeaveResponse { left: true }).into_response())
        }
        None | Some("join") => {
            // Prefer the submitted display name, then the profile, then the id.
            let username = match body.username {
                Some(name) if !name.is_empty() => name,
                _ => state
                    .profiles
                    .username(&body.user_id)
                    .await
                    .unwrap_or_else(|| body.user_id.clone()),
            };
            let outcome = state.arena.join(&body.user_id, &username, game_type).await?;
            if outcome.matched {
                haven_metrics::record_match_created();
            }
            Ok(Json(outcome).into_response())
        }
        Some(other) => Err(ApiError::BadRequest(format!("unknown action: {other}"))),
    }
}

#[derive(Deserialize)]
pub(crate) struct PollQuery {
    user_id: String,
}

#[derive(Serialize)]
pub(crate) struct PollResponse {
    matched: bool,
    game_id: Option<String>,
    opponent: Option<String>,
    session: Option<GameSession>,
}

/// `GET /games/matchmaking` — poll for the caller's session.
pub(crate) async fn poll(
    State(state): State<AppState>,
    Query(q): Query<PollQuery>,
) -> Result<Json<PollResponse>, ApiError> {
    haven_metrics::record_request("matchmaking_poll");

    let session = state.arena.user_game(&q.user_id).await?;
    let response = match session {
        Some(session) => PollResponse {
            matched: true,
            game_id: Some(session.game_id.clone()),
            opponent: session.opponent_of(&q.user_id).map(|p| p.username.clone()),
            session: Some(session),
        },
        None => PollResponse {
            matched: false,
            game_id: None,
            opponent: None,
            session: None,
        },
    };
    Ok(Json(response))
}

#[derive(Deserialize)]
pub(crate) struct MoveBody {
    game_id: String,
    user_id: String,
    position: usize,
}

#[derive(Serialize)]
pub(crate) struct MoveResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<GameSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// `POST /games/move` — apply one move.
///
/// Validation failures come back as `success=false` with a descriptive
/// error and a 4xx status; the session is untouched.
pub(crate) async fn play_move(
    State(state): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Response, ApiError> {
    haven_metrics::record_request("move");

    match state
        .arena
        .apply_move(&body.game_id, &body.user_id, body.position)
        .await
    {
        Ok(session) => {
            haven_metrics::record_move_applied();
            Ok(Json(MoveResponse {
                success: true,
                session: Some(session),
                error: None,
            })
            .into_response())
        }
        Err(err) if err.is_validation() => Ok((
            arena_status(&err),
            Json(MoveResponse {
                success: false,
                session: None,
                error: Some(err.to_string()),
            }),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

#[derive(Deserialize)]
pub(crate) struct GameStateQuery {
    game_id: String,
}

/// `GET /games/move` — fetch current session state.
pub(crate) async fn game_state(
    State(state): State<AppState>,
    Query(q): Query<GameStateQuery>,
) -> Result<Response, ApiError> {
    haven_metrics::record_request("game_state");

    match state.arena.session(&q.game_id).await? {
        Some(session) => Ok(Json(MoveResponse {
            success: true,
            session: Some(session),
            error: None,
        })
        .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(MoveResponse {
                success: false,
                session: None,
                error: Some("game not found".into()),
            }),
        )
            .into_response()),
    }
}

#[derive(Deserialize)]
pub(crate) struct EndBody {
    game_id: String,
}

#[derive(Serialize)]
pub(crate) struct EndResponse {
    ended: bool,
}

/// `POST /games/end` — finish or abandon a session.
pub(crate) async fn end_game(
    State(state): State<AppState>,
    Json(body): Json<EndBody>,
) -> Result<Json<EndResponse>, ApiError> {
    haven_metrics::record_request("end_game");

    state.arena.end_game(&body.game_id).await?;
    Ok(Json(EndResponse { ended: true }))
}

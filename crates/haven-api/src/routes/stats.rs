//! Leaderboard and result-submission endpoints.

use axum::Json;
use axum::extract::{Query, State};
use haven_stats::{
    BrainGame, BrainLeaderboard, BrainStats, LeaderboardQuery, MatchOutcome, MatchStats,
    ScoreOutcome,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub(crate) struct LeaderboardParams {
    user_id: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
    /// Brain-game leaderboards only: rank by one game instead of the total.
    game: Option<String>,
}

impl LeaderboardParams {
    fn query(&self) -> LeaderboardQuery {
        LeaderboardQuery {
            limit: self.limit,
            offset: self.offset,
            for_user: self.user_id.clone(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct MatchBoardRow {
    user_id: String,
    username: String,
    #[serde(flatten)]
    stats: MatchStats,
}

#[derive(Serialize)]
pub(crate) struct MatchBoardResponse {
    entries: Vec<MatchBoardRow>,
    user_rank: Option<usize>,
    total: usize,
}

/// `GET /games/leaderboard` — head-to-head rankings.
pub(crate) async fn match_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<MatchBoardResponse> {
    haven_metrics::record_request("games_leaderboard");

    let board = state.matches.leaderboard(&params.query()).await;
    let mut entries = Vec::with_capacity(board.entries.len());
    for entry in board.entries {
        let username = state
            .profiles
            .username(&entry.user_id)
            .await
            .unwrap_or_else(|| entry.user_id.clone());
        entries.push(MatchBoardRow {
            user_id: entry.user_id,
            username,
            stats: entry.stats,
        });
    }

    Json(MatchBoardResponse {
        entries,
        user_rank: board.user_rank,
        total: board.total,
    })
}

#[derive(Deserialize)]
pub(crate) struct SaveStatsBody {
    user_id: String,
    /// Game the result came from. Stats are cumulative across games, so
    /// this only gets validated, not stored.
    game: Option<String>,
    result: String,
}

/// `POST /games/save-stats` — record a completed match result.
pub(crate) async fn save_stats(
    State(state): State<AppState>,
    Json(body): Json<SaveStatsBody>,
) -> Result<Json<MatchStats>, ApiError> {
    haven_metrics::record_request("games_save_stats");

    if let Some(game) = &body.game {
        game.parse::<haven_arena::GameType>()
            .map_err(ApiError::BadRequest)?;
    }
    let outcome = body
        .result
        .parse::<MatchOutcome>()
        .map_err(ApiError::BadRequest)?;
    let stats = state.matches.record(&body.user_id, outcome).await?;
    haven_metrics::record_match_result();
    Ok(Json(stats))
}

/// `GET /adhd-games/leaderboard` — brain-game rankings.
pub(crate) async fn brain_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<BrainLeaderboard>, ApiError> {
    haven_metrics::record_request("adhd_games_leaderboard");

    let game = params
        .game
        .as_deref()
        .map(str::parse::<BrainGame>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    Ok(Json(state.brain.leaderboard(game, &params.query()).await))
}

#[derive(Deserialize)]
pub(crate) struct SaveScoreBody {
    user_id: String,
    username: String,
    game: String,
    score: u64,
}

#[derive(Serialize)]
pub(crate) struct SaveScoreResponse {
    is_new_high_score: bool,
    stats: BrainStats,
}

/// `POST /adhd-games/save-score` — submit a solo game score.
pub(crate) async fn save_score(
    State(state): State<AppState>,
    Json(body): Json<SaveScoreBody>,
) -> Result<Json<SaveScoreResponse>, ApiError> {
    haven_metrics::record_request("adhd_games_save_score");

    let game = body
        .game
        .parse::<BrainGame>()
        .map_err(ApiError::BadRequest)?;
    let ScoreOutcome {
        is_new_high_score,
        stats,
    } = state
        .brain
        .save_score(&body.user_id, &body.username, game, body.score)
        .await?;
    if is_new_high_score {
        haven_metrics::record_high_score();
    }
    Ok(Json(SaveScoreResponse {
        is_new_high_score,
        stats,
    }))
}

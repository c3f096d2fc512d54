//! Route table.

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

mod arena;
mod stats;
mod usage;

/// Build the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/usage", get(usage::check))
        .route("/usage/record", post(usage::record))
        .route("/games/leaderboard", get(stats::match_leaderboard))
        .route("/games/save-stats", post(stats::save_stats))
        .route("/adhd-games/leaderboard", get(stats::brain_leaderboard))
        .route("/adhd-games/save-score", post(stats::save_score))
        .route("/games/matchmaking", post(arena::matchmaking).get(arena::poll))
        .route("/games/move", post(arena::play_move).get(arena::game_state))
        .route("/games/end", post(arena::end_game))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

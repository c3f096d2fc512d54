//! End-to-end tests over a live HTTP server backed by the in-memory store.

use std::net::SocketAddr;
use std::sync::Arc;

use haven_api::{AppState, SharedStore, router};
use haven_quota::QuotaLimits;
use haven_store::{KvStore, MemoryStore};
use serde_json::{Value, json};

/// Start a server on an ephemeral port; returns its address and the store
/// for seeding collaborator-owned records (profiles).
async fn start_server() -> (SocketAddr, SharedStore) {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), QuotaLimits { free_daily: 3 });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    (addr, store)
}

async fn seed_profile(store: &SharedStore, user_id: &str, username: &str, plan: &str) {
    store
        .hset_all(
            &format!("user:{user_id}:profile"),
            &[
                ("username".into(), username.to_string()),
                ("email".into(), format!("{username}@example.com")),
                ("plan".into(), plan.to_string()),
            ],
        )
        .await
        .unwrap();
}

async fn get_json(url: &str) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn post_json(url: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (addr, _) = start_server().await;
    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn quota_flow_exhausts_the_free_allowance() {
    let (addr, _) = start_server().await;
    let base = format!("http://{addr}");

    let (status, body) = get_json(&format!("{base}/usage?user_id=u1&plan=free")).await;
    assert_eq!(status, 200);
    assert_eq!(body["allowed"], json!(true));
    assert_eq!(body["used"], json!(0));
    assert_eq!(body["limit"], json!(3));

    for _ in 0..3 {
        let (status, _) = post_json(&format!("{base}/usage/record"), json!({"user_id": "u1"})).await;
        assert_eq!(status, 200);
    }

    let (_, body) = get_json(&format!("{base}/usage?user_id=u1&plan=free")).await;
    assert_eq!(body["allowed"], json!(false));
    assert_eq!(body["remaining"], json!(0));
    assert_eq!(body["used"], json!(3));
}

#[tokio::test]
async fn usage_plan_comes_from_the_profile() {
    let (addr, store) = start_server().await;
    seed_profile(&store, "u1", "ada", "premium").await;

    let (_, body) = get_json(&format!("http://{addr}/usage?user_id=u1")).await;
    assert_eq!(body["plan"], json!("premium"));
    assert_eq!(body["allowed"], json!(true));
    assert_eq!(body["limit"], Value::Null);
}

#[tokio::test]
async fn unknown_plan_is_rejected() {
    let (addr, _) = start_server().await;
    let (status, body) = get_json(&format!("http://{addr}/usage?user_id=u1&plan=gold")).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("unknown plan"));
}

#[tokio::test]
async fn score_submission_tracks_high_water_marks() {
    let (addr, _) = start_server().await;
    let base = format!("http://{addr}");

    let (status, body) = post_json(
        &format!("{base}/adhd-games/save-score"),
        json!({"user_id": "u1", "username": "ada", "game": "memory", "score": 100}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["is_new_high_score"], json!(true));
    assert_eq!(body["stats"]["total_score"], json!(100));

    let (_, body) = post_json(
        &format!("{base}/adhd-games/save-score"),
        json!({"user_id": "u1", "username": "ada", "game": "memory", "score": 40}),
    )
    .await;
    assert_eq!(body["is_new_high_score"], json!(false));
    assert_eq!(body["stats"]["memory"], json!(100));

    let (_, body) = get_json(&format!("{base}/adhd-games/leaderboard?game=memory")).await;
    assert_eq!(body["entries"][0]["user_id"], json!("u1"));
    assert_eq!(body["entries"][0]["memory"], json!(100));

    let (status, _) = get_json(&format!("{base}/adhd-games/leaderboard?game=tetris")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn match_results_feed_the_leaderboard() {
    let (addr, store) = start_server().await;
    let base = format!("http://{addr}");
    seed_profile(&store, "u1", "ada", "free").await;

    for result in ["win", "win", "loss", "win"] {
        let (status, _) = post_json(
            &format!("{base}/games/save-stats"),
            json!({"user_id": "u1", "result": result}),
        )
        .await;
        assert_eq!(status, 200);
    }

    let (_, body) = get_json(&format!("{base}/games/leaderboard?user_id=u1")).await;
    assert_eq!(body["user_rank"], json!(1));
    let row = &body["entries"][0];
    assert_eq!(row["username"], json!("ada"));
    assert_eq!(row["wins"], json!(3));
    assert_eq!(row["losses"], json!(1));
    assert_eq!(row["streak"], json!(1));

    let (status, _) = post_json(
        &format!("{base}/games/save-stats"),
        json!({"user_id": "u1", "result": "forfeit"}),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = post_json(
        &format!("{base}/games/save-stats"),
        json!({"user_id": "u1", "game": "chess", "result": "win"}),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = post_json(
        &format!("{base}/games/save-stats"),
        json!({"user_id": "u1", "game": "tic-tac-toe", "result": "win"}),
    )
    .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn matchmaking_and_moves_run_a_full_game() {
    let (addr, _) = start_server().await;
    let base = format!("http://{addr}");

    let (_, first) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u1", "username": "ada", "game_type": "tic-tac-toe"}),
    )
    .await;
    assert_eq!(first["matched"], json!(false));

    let (_, second) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u2", "username": "bob", "game_type": "tic-tac-toe"}),
    )
    .await;
    assert_eq!(second["matched"], json!(true));
    assert_eq!(second["opponent"], json!("ada"));
    let game_id = second["game_id"].as_str().unwrap().to_string();

    // The waiter learns about the match by polling.
    let (_, poll) = get_json(&format!("{base}/games/matchmaking?user_id=u1")).await;
    assert_eq!(poll["matched"], json!(true));
    assert_eq!(poll["game_id"], json!(game_id.clone()));
    assert_eq!(poll["opponent"], json!("bob"));

    // O cannot open the game.
    let (status, body) = post_json(
        &format!("{base}/games/move"),
        json!({"game_id": game_id, "user_id": "u2", "position": 0}),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], json!(false));

    // X takes the top row.
    for (user, position) in [("u1", 0), ("u2", 3), ("u1", 1), ("u2", 4)] {
        let (status, body) = post_json(
            &format!("{base}/games/move"),
            json!({"game_id": game_id, "user_id": user, "position": position}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], json!(true));
    }
    let (_, body) = post_json(
        &format!("{base}/games/move"),
        json!({"game_id": game_id, "user_id": "u1", "position": 2}),
    )
    .await;
    assert_eq!(body["session"]["status"], json!("finished"));
    assert_eq!(body["session"]["winner"], json!("u1"));

    let (status, body) = get_json(&format!("{base}/games/move?game_id={game_id}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["session"]["status"], json!("finished"));

    // Both players are free to queue again.
    let (_, requeue) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u1", "username": "ada", "game_type": "tic-tac-toe"}),
    )
    .await;
    assert_eq!(requeue["matched"], json!(false));
}

#[tokio::test]
async fn leaving_the_queue_prevents_pairing() {
    let (addr, _) = start_server().await;
    let base = format!("http://{addr}");

    post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u1", "username": "ada", "game_type": "tic-tac-toe"}),
    )
    .await;
    let (status, body) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u1", "game_type": "tic-tac-toe", "action": "leave"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["left"], json!(true));

    let (_, second) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u2", "username": "bob", "game_type": "tic-tac-toe"}),
    )
    .await;
    assert_eq!(second["matched"], json!(false));
}

#[tokio::test]
async fn end_game_tears_down_the_session() {
    let (addr, _) = start_server().await;
    let base = format!("http://{addr}");

    post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u1", "username": "ada", "game_type": "tic-tac-toe"}),
    )
    .await;
    let (_, second) = post_json(
        &format!("{base}/games/matchmaking"),
        json!({"user_id": "u2", "username": "bob", "game_type": "tic-tac-toe"}),
    )
    .await;
    let game_id = second["game_id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &format!("{base}/games/end"),
        json!({"game_id": game_id}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["ended"], json!(true));

    let (status, _) = get_json(&format!("{base}/games/move?game_id={game_id}")).await;
    assert_eq!(status, 404);

    let (_, poll) = get_json(&format!("{base}/games/matchmaking?user_id=u1")).await;
    assert_eq!(poll["matched"], json!(false));
}

#[tokio::test]
async fn unknown_game_type_is_rejected() {
    let (addr, _) = start_server().await;
    let (status, body) = post_json(
        &format!("http://{addr}/games/matchmaking"),
        json!({"user_id": "u1", "username": "ada", "game_type": "chess"}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("unknown game type"));
}

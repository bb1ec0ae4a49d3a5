mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::habit;

#[tokio::test]
async fn test_streak_counts_consecutive_days_through_today() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post(
        "/habits",
        &token,
        habit("h1", "meditate", &["Wed Oct 14 2026", "Fri Oct 16 2026", "Thu Oct 15 2026"]),
    )
    .await;

    let (status, body) = app
        .get("/habits/h1/streak?today=2026-10-16", &token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["streak"]["habitId"], "h1");
    assert_eq!(body["streak"]["currentStreak"], 3);
    assert_eq!(body["streak"]["completedToday"], true);
    assert_eq!(body["streak"]["totalCompletions"], 3);
}

#[tokio::test]
async fn test_streak_is_zero_until_today_is_marked() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post(
        "/habits",
        &token,
        habit("h1", "meditate", &["Thu Oct 15 2026", "Wed Oct 14 2026"]),
    )
    .await;

    let (_, body) = app
        .get("/habits/h1/streak?today=2026-10-16", &token)
        .await;

    assert_eq!(body["streak"]["currentStreak"], 0);
    assert_eq!(body["streak"]["completedToday"], false);
}

#[tokio::test]
async fn test_grid_shows_today_rightmost() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post("/habits", &token, habit("h1", "walk", &["Fri Oct 16 2026"]))
        .await;

    let (_, body) = app
        .get("/habits/h1/streak?today=2026-10-16", &token)
        .await;

    let days = body["streak"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days.iter().filter(|d| d["completed"] == true).count(), 1);
    assert_eq!(
        days[6],
        json!({
            "date": "2026-10-16",
            "key": "Fri Oct 16 2026",
            "completed": true,
            "isToday": true,
        })
    );
    assert_eq!(days[0]["date"], "2026-10-10");
}

#[tokio::test]
async fn test_grid_length_follows_days_param() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post("/habits", &token, habit("h1", "walk", &[])).await;

    let (status, body) = app
        .get("/habits/h1/streak?today=2026-10-16&days=30", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["streak"]["days"].as_array().unwrap().len(), 30);

    let (status, body) = app
        .get("/habits/h1/streak?today=2026-10-16&days=0", &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_streak_rejects_malformed_date() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post("/habits", &token, habit("h1", "walk", &[])).await;

    let (status, body) = app
        .get("/habits/h1/streak?today=yesterday", &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_streak_for_unknown_habit_is_404() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;

    let (status, body) = app.get("/habits/missing/streak", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Habit not found" }));
}

#[tokio::test]
async fn test_toggling_today_through_update_moves_the_streak() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post("/habits", &token, habit("h1", "walk", &["Thu Oct 15 2026"]))
        .await;

    app.put(
        "/habits/h1",
        &token,
        habit("h1", "walk", &["Thu Oct 15 2026", "Fri Oct 16 2026"]),
    )
    .await;
    let (_, body) = app
        .get("/habits/h1/streak?today=2026-10-16", &token)
        .await;
    assert_eq!(body["streak"]["currentStreak"], 2);

    app.put("/habits/h1", &token, habit("h1", "walk", &["Thu Oct 15 2026"]))
        .await;
    let (_, body) = app
        .get("/habits/h1/streak?today=2026-10-16", &token)
        .await;
    assert_eq!(body["streak"]["currentStreak"], 0);
}

#[tokio::test]
async fn test_grid_before_earliest_date_is_400() {
    let app = common::build();
    let (_, token) = app.register("ada@example.com").await;
    app.post("/habits", &token, habit("h1", "walk", &[])).await;

    let (status, body) = app
        .get("/habits/h1/streak?today=-262143-01-01&days=7", &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "today is out of range for the requested days" })
    );

    let (status, body) = app
        .get("/habits/h1/streak?today=-262143-01-01&days=1", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["streak"]["days"].as_array().unwrap().len(), 1);
}

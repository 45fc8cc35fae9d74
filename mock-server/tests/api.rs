use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- leaderboard ---

#[tokio::test]
async fn leaderboard_starts_empty() {
    let resp = app().oneshot(get("/api/leaderboard?limit=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn leaderboard_rejects_bad_limit() {
    let resp = app().oneshot(get("/api/leaderboard?limit=many")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- user ---

#[tokio::test]
async fn login_unknown_user_returns_detail() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            json!({"username": "ghost", "password": "boo"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["detail"], "Invalid username or password");
}

#[tokio::test]
async fn register_missing_fields_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/user/register", json!({"username": "neo"})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn tier_for_unknown_user_is_404() {
    let resp = app().oneshot(get("/api/game/my_tier/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "User not found");
}

// --- game ---

#[tokio::test]
async fn random_question_has_answers() {
    let resp = app().oneshot(get("/api/game/random")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let question = body_json(resp).await;
    assert_eq!(question["question_id"], 1);
    assert!(!question["answers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_question_is_404() {
    let resp = app().oneshot(get("/api/game/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["detail"], "Question not found");
}

#[tokio::test]
async fn bad_question_id_returns_400() {
    let resp = app().oneshot(get("/api/game/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- media ---

#[tokio::test]
async fn media_metadata_and_file() {
    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/media/2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let media = body_json(resp).await;
    assert_eq!(media["media_path"], "questions/2.mp4");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/media/questions/2.mp4"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "video/mp4");
    assert!(!body_bytes(resp).await.is_empty());
}

// --- full player lifecycle ---

#[tokio::test]
async fn player_lifecycle() {
    let mut app = app().into_service();

    // register
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/user/register",
            json!({"username": "neo", "email": "neo@zion.io", "password": "redpill"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // duplicate register
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/user/register",
            json!({"username": "neo", "email": "other@zion.io", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["detail"], "Username already exists");

    // login
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/user/login",
            json!({"username": "neo", "password": "redpill"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user = body_json(resp).await;
    let user_id = user["user_id"].as_i64().unwrap();
    assert_eq!(user["username"], "neo");

    // unrated before playing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/game/my_tier/{user_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["tier"], Value::Null);

    // answer correctly and quickly
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/game/submit",
            json!({
                "user_id": user_id, "question_id": 1, "selected_id": 1,
                "correct_id": 1, "score_earned": 10, "response_time_ms": 1500
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome = body_json(resp).await;
    assert_eq!(outcome["correct"], true);
    assert_eq!(outcome["tier"], "Easy");

    // leaderboard shows the player
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/leaderboard?limit=3"))
        .await
        .unwrap();
    assert_eq!(
        body_json(resp).await,
        json!([{"username": "neo", "score": 10, "tier": "Easy"}])
    );

    // a lower score does not replace the best one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/leaderboard/submit_score",
            json!({"user_id": user_id, "score": 4}),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["best_score"], 10);

    // email lookup goes through the query string
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/user/email?username=neo&password=redpill"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["email"], "neo@zion.io");

    // deactivate removes the player from the board
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/user/deactivate",
            json!({"username": "neo", "password": "redpill"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/leaderboard"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}

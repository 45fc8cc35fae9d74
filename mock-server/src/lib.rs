//! In-memory stand-in for the deepfake quiz backend.
//!
//! Serves the same routes as the real backend so the client can be exercised
//! end to end. Failures use the backend's `{"detail": "..."}` body shape.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

use store::{Attempt, QuestionRecord, Store};

pub type Db = Arc<RwLock<Store>>;

/// A failed request, rendered as `{"detail": message}`.
#[derive(Debug)]
pub struct Failure(StatusCode, &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

type Reply = Result<Json<Value>, Failure>;

#[derive(Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUsername {
    pub username: String,
    pub password: String,
    pub new_username: String,
}

#[derive(Deserialize)]
pub struct UpdatePassword {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct UpdateEmail {
    pub username: String,
    pub password: String,
    pub email: String,
    pub new_email: String,
}

#[derive(Deserialize)]
pub struct SubmitAnswer {
    pub user_id: i64,
    pub question_id: i64,
    pub selected_id: i64,
    pub correct_id: i64,
    pub score_earned: i64,
    pub response_time_ms: i64,
}

#[derive(Deserialize)]
pub struct SubmitScore {
    pub user_id: i64,
    pub score: i64,
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
        .route("/api/user/update-username", put(update_username))
        .route("/api/user/update-password", put(update_password))
        .route("/api/user/update-email", put(update_email))
        .route("/api/user/email", get(get_email))
        .route("/api/user/deactivate", post(deactivate))
        .route("/api/game/random", get(random_question))
        .route("/api/game/submit", post(submit_answer))
        .route("/api/game/my_tier/{user_id}", get(my_tier))
        .route("/api/game/{question_id}", get(get_question))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/leaderboard/submit_score", post(submit_score))
        .route("/api/media/{question_id}", get(question_media))
        .route("/media/{*path}", get(media_file))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

const BAD_CREDENTIALS: Failure = Failure(StatusCode::UNAUTHORIZED, "Invalid username or password");

// -- user -------------------------------------------------------------------

async fn register(State(db): State<Db>, Json(input): Json<RegisterUser>) -> Result<(StatusCode, Json<Value>), Failure> {
    if input.username.is_empty() || input.password.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Username and password are required"));
    }
    let mut store = db.write().await;
    if store.account_by_name(&input.username).is_some() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Username already exists"));
    }
    let user_id = store.add_account(input.username, input.email, input.password);
    tracing::info!(user_id, "registered user");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully", "user_id": user_id })),
    ))
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply {
    let mut store = db.write().await;
    let account = store
        .authenticate(&input.username, &input.password)
        .ok_or(BAD_CREDENTIALS)?;
    Ok(Json(json!({
        "message": "Login successful",
        "user_id": account.user_id,
        "username": account.username,
    })))
}

async fn update_username(State(db): State<Db>, Json(input): Json<UpdateUsername>) -> Reply {
    let mut store = db.write().await;
    if input.new_username.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "New username is required"));
    }
    if store.account_by_name(&input.new_username).is_some() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Username already exists"));
    }
    let account = store
        .authenticate(&input.username, &input.password)
        .ok_or(BAD_CREDENTIALS)?;
    account.username = input.new_username;
    Ok(Json(json!({
        "message": "Username updated successfully",
        "username": account.username,
    })))
}

async fn update_password(State(db): State<Db>, Json(input): Json<UpdatePassword>) -> Reply {
    if input.new_password.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "New password is required"));
    }
    let mut store = db.write().await;
    let account = store
        .authenticate(&input.username, &input.current_password)
        .ok_or(BAD_CREDENTIALS)?;
    account.password = input.new_password;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}

async fn update_email(State(db): State<Db>, Json(input): Json<UpdateEmail>) -> Reply {
    let mut store = db.write().await;
    let account = store
        .authenticate(&input.username, &input.password)
        .ok_or(BAD_CREDENTIALS)?;
    if account.email != input.email {
        return Err(Failure(StatusCode::BAD_REQUEST, "Current email does not match"));
    }
    account.email = input.new_email;
    Ok(Json(json!({
        "message": "Email updated successfully",
        "email": account.email,
    })))
}

async fn get_email(State(db): State<Db>, Query(input): Query<Credentials>) -> Reply {
    let mut store = db.write().await;
    let account = store
        .authenticate(&input.username, &input.password)
        .ok_or(BAD_CREDENTIALS)?;
    Ok(Json(json!({ "email": account.email })))
}

async fn deactivate(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply {
    let mut store = db.write().await;
    let account = store
        .authenticate(&input.username, &input.password)
        .ok_or(BAD_CREDENTIALS)?;
    account.active = false;
    tracing::info!(user_id = account.user_id, "deactivated user");
    Ok(Json(json!({ "message": "Account deactivated" })))
}

// -- game -------------------------------------------------------------------

fn question_json(question: &QuestionRecord) -> Json<Value> {
    Json(json!(question))
}

async fn random_question(State(db): State<Db>) -> Reply {
    let mut store = db.write().await;
    store
        .next_question()
        .map(question_json)
        .ok_or(Failure(StatusCode::NOT_FOUND, "No questions found"))
}

async fn get_question(State(db): State<Db>, Path(question_id): Path<i64>) -> Reply {
    let store = db.read().await;
    store
        .question(question_id)
        .map(question_json)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Question not found"))
}

async fn submit_answer(State(db): State<Db>, Json(input): Json<SubmitAnswer>) -> Reply {
    let mut store = db.write().await;
    if store.account(input.user_id).is_none() {
        return Err(Failure(StatusCode::NOT_FOUND, "User not found"));
    }
    if store.question(input.question_id).is_none() {
        return Err(Failure(StatusCode::NOT_FOUND, "Question not found"));
    }
    let correct = input.selected_id == input.correct_id;
    store.attempts.push(Attempt {
        user_id: input.user_id,
        correct,
        response_time_ms: input.response_time_ms,
    });
    *store.scores.entry(input.user_id).or_insert(0) += input.score_earned;

    Ok(Json(json!({
        "message": "Answer submitted.",
        "earned": input.score_earned,
        "correct": correct,
        "tier": store.tier(input.user_id).unwrap_or("Unrated"),
    })))
}

async fn my_tier(State(db): State<Db>, Path(user_id): Path<i64>) -> Reply {
    let store = db.read().await;
    if store.account(user_id).is_none() {
        return Err(Failure(StatusCode::NOT_FOUND, "User not found"));
    }
    Ok(Json(json!({ "user_id": user_id, "tier": store.tier(user_id) })))
}

// -- leaderboard --------------------------------------------------------------

async fn leaderboard(State(db): State<Db>, Query(query): Query<LeaderboardQuery>) -> Json<Value> {
    let store = db.read().await;
    let rows: Vec<Value> = store
        .standings(query.limit)
        .into_iter()
        .map(|(username, score, tier)| json!({ "username": username, "score": score, "tier": tier }))
        .collect();
    Json(Value::Array(rows))
}

/// Keeps the best score per user.
async fn submit_score(State(db): State<Db>, Json(input): Json<SubmitScore>) -> Reply {
    let mut store = db.write().await;
    if store.account(input.user_id).is_none() {
        return Err(Failure(StatusCode::NOT_FOUND, "User not found"));
    }
    let best = store.scores.entry(input.user_id).or_insert(input.score);
    *best = (*best).max(input.score);
    let best_score = *best;
    Ok(Json(json!({ "message": "Score submitted", "best_score": best_score })))
}

// -- media ------------------------------------------------------------------

async fn question_media(State(db): State<Db>, Path(question_id): Path<i64>) -> Reply {
    let store = db.read().await;
    let question = store
        .question(question_id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Media not found"))?;
    Ok(Json(json!({
        "question_id": question.question_id,
        "media_type": question.question_type,
        "media_path": question.media_path,
    })))
}

async fn media_file(Path(path): Path<String>) -> impl IntoResponse {
    let content_type = match path.rsplit('.').next() {
        Some("png") => "image/png",
        Some("mp4") => "video/mp4",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    };
    ([(header::CONTENT_TYPE, content_type)], format!("placeholder for {path}"))
}

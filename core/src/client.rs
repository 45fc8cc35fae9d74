//! Stateless HTTP request builder and response parser for the quiz API.
//!
//! # Design
//! `QuizClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Every `parse_*` shares one failure path: any non-2xx status becomes
//! `ApiError::Request` carrying the message unwrapped from the body, or the
//! endpoint's default message when the body has none.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{extract_message, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AnswerSubmission, Credentials, EmailResponse, EmailUpdate, LeaderboardEntry, PasswordUpdate,
    Question, ScoreSubmission, SubmitOutcome, TierResponse, User, UsernameUpdate,
};

/// Leaderboard size requested when the caller has no preference.
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

const REGISTER_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const TIER_FAILED: &str = "Failed to fetch tier";
const QUESTION_FAILED: &str = "Failed to fetch question";
const RANDOM_QUESTION_FAILED: &str = "Failed to fetch random question";
const SUBMIT_ANSWER_FAILED: &str = "Failed to submit answer";
const LEADERBOARD_FAILED: &str = "Failed to fetch leaderboard";
const SUBMIT_SCORE_FAILED: &str = "Failed to submit score";
const MEDIA_FAILED: &str = "Failed to fetch media";
const UPDATE_USERNAME_FAILED: &str = "Failed to update username";
const UPDATE_PASSWORD_FAILED: &str = "Failed to update password";
const UPDATE_EMAIL_FAILED: &str = "Failed to update email";
const EMAIL_FAILED: &str = "Failed to fetch email";
const DEACTIVATE_FAILED: &str = "Failed to deactivate account";

/// Synchronous, stateless client for the quiz API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct QuizClient {
    base_url: String,
}

impl QuizClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // -- user / auth ------------------------------------------------------

    /// The registration payload is forwarded untouched.
    pub fn build_register_user<T: Serialize>(&self, payload: &T) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url("/api/user/register"),
            to_json(payload)?,
        ))
    }

    pub fn parse_register_user(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, REGISTER_FAILED)
    }

    pub fn build_login_user(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        Ok(HttpRequest::json(HttpMethod::Post, self.url("/api/user/login"), body))
    }

    pub fn parse_login_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, LOGIN_FAILED)
    }

    pub fn build_get_my_tier(&self, user_id: i64) -> HttpRequest {
        HttpRequest::get(self.url(&format!("/api/game/my_tier/{user_id}")))
    }

    pub fn parse_get_my_tier(&self, response: HttpResponse) -> Result<TierResponse, ApiError> {
        parse_json(response, TIER_FAILED)
    }

    // -- game -------------------------------------------------------------

    pub fn build_get_question(&self, question_id: i64) -> HttpRequest {
        HttpRequest::get(self.url(&format!("/api/game/{question_id}")))
    }

    pub fn parse_get_question(&self, response: HttpResponse) -> Result<Question, ApiError> {
        parse_json(response, QUESTION_FAILED)
    }

    pub fn build_get_random_question(&self) -> HttpRequest {
        HttpRequest::get(self.url("/api/game/random"))
    }

    pub fn parse_get_random_question(&self, response: HttpResponse) -> Result<Question, ApiError> {
        parse_json(response, RANDOM_QUESTION_FAILED)
    }

    pub fn build_submit_answer(&self, submission: &AnswerSubmission) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url("/api/game/submit"),
            to_json(submission)?,
        ))
    }

    pub fn parse_submit_answer(&self, response: HttpResponse) -> Result<SubmitOutcome, ApiError> {
        parse_json(response, SUBMIT_ANSWER_FAILED)
    }

    // -- leaderboard ------------------------------------------------------

    pub fn build_get_leaderboard(&self, limit: u32) -> HttpRequest {
        HttpRequest::get(self.url(&format!("/api/leaderboard?limit={limit}")))
    }

    /// Entries come back in server order; nothing is sorted or trimmed.
    pub fn parse_get_leaderboard(&self, response: HttpResponse) -> Result<Vec<LeaderboardEntry>, ApiError> {
        parse_json(response, LEADERBOARD_FAILED)
    }

    pub fn build_submit_score(&self, user_id: i64, score: i64) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.url("/api/leaderboard/submit_score"),
            to_json(&ScoreSubmission { user_id, score })?,
        ))
    }

    pub fn parse_submit_score(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, SUBMIT_SCORE_FAILED)
    }

    // -- media ------------------------------------------------------------

    pub fn build_get_question_media(&self, question_id: i64) -> HttpRequest {
        HttpRequest::get(self.url(&format!("/api/media/{question_id}")))
    }

    pub fn parse_get_question_media(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, MEDIA_FAILED)
    }

    /// Direct asset URL. Pure string concatenation, no request involved.
    pub fn full_media_url(&self, media_path: &str) -> String {
        format!("{}/media/{media_path}", self.base_url)
    }

    // -- settings / account -----------------------------------------------

    /// Fails with `ApiError::Validation` before building anything when any
    /// argument is empty.
    pub fn build_update_username(
        &self,
        username: &str,
        password: &str,
        new_username: &str,
    ) -> Result<HttpRequest, ApiError> {
        if username.is_empty() || password.is_empty() || new_username.is_empty() {
            return Err(ApiError::Validation(
                "Missing required fields for username update".to_string(),
            ));
        }
        let body = to_json(&UsernameUpdate {
            username: username.to_string(),
            password: password.to_string(),
            new_username: new_username.to_string(),
        })?;
        Ok(HttpRequest::json(HttpMethod::Put, self.url("/api/user/update-username"), body))
    }

    pub fn parse_update_username(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, UPDATE_USERNAME_FAILED)
    }

    pub fn build_update_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_json(&PasswordUpdate {
            username: username.to_string(),
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })?;
        Ok(HttpRequest::json(HttpMethod::Put, self.url("/api/user/update-password"), body))
    }

    pub fn parse_update_password(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, UPDATE_PASSWORD_FAILED)
    }

    pub fn build_update_email(
        &self,
        username: &str,
        password: &str,
        email: &str,
        new_email: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_json(&EmailUpdate {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            new_email: new_email.to_string(),
        })?;
        Ok(HttpRequest::json(HttpMethod::Put, self.url("/api/user/update-email"), body))
    }

    pub fn parse_update_email(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, UPDATE_EMAIL_FAILED)
    }

    pub fn build_get_email(&self, username: &str, password: &str) -> HttpRequest {
        let path = format!(
            "/api/user/email?username={}&password={}",
            urlencoding::encode(username),
            urlencoding::encode(password)
        );
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(&path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// Returns only the `email` field of the response.
    pub fn parse_get_email(&self, response: HttpResponse) -> Result<String, ApiError> {
        let data: EmailResponse = parse_json(response, EMAIL_FAILED)?;
        Ok(data.email)
    }

    pub fn build_deactivate_account(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        Ok(HttpRequest::json(HttpMethod::Post, self.url("/api/user/deactivate"), body))
    }

    pub fn parse_deactivate_account(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(response, DEACTIVATE_FAILED)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Map non-2xx responses to `ApiError::Request`, otherwise decode the body.
fn parse_json<T: DeserializeOwned>(response: HttpResponse, default_message: &str) -> Result<T, ApiError> {
    if !response.is_success() {
        let message = extract_message(&response.body, default_message);
        debug!(status = response.status, %message, "request failed");
        return Err(ApiError::Request {
            status: response.status,
            message,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

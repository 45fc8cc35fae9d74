//! Domain DTOs for the quiz API.
//!
//! # Design
//! These types mirror the backend's JSON but are defined independently from
//! the mock-server crate; integration tests catch schema drift. Payloads the
//! client only forwards (registration, media metadata) stay as
//! `serde_json::Value`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
}

/// Difficulty tier assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// Parse a backend label. Anything other than the three known labels is
    /// `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Easy" => Some(Tier::Easy),
            "Medium" => Some(Tier::Medium),
            "Hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Medium => "Medium",
            Tier::Hard => "Hard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response of `GET /api/game/my_tier/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierResponse {
    #[serde(default)]
    pub tier: Option<String>,
}

/// One row of the leaderboard, in server order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i64,
    #[serde(default)]
    pub tier: Option<String>,
}

/// A quiz question with its candidate answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub question_id: i64,
    pub question_type: String,
    pub question_text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.correct)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub id: i64,
    #[serde(deserialize_with = "bool_or_int")]
    pub correct: bool,
    pub text: String,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// The backend stores flags as SQLite integers, so accept `0`/`1` as well.
fn bool_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

/// Request payload for `POST /api/game/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub user_id: i64,
    pub question_id: i64,
    pub selected_id: i64,
    pub correct_id: i64,
    pub score_earned: i64,
    pub response_time_ms: i64,
}

/// Response of `POST /api/game/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub message: String,
    pub earned: i64,
    pub correct: bool,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub user_id: i64,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsernameUpdate {
    pub username: String,
    pub password: String,
    pub new_username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordUpdate {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailUpdate {
    pub username: String,
    pub password: String,
    pub email: String,
    pub new_email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmailResponse {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_labels_parse() {
        assert_eq!(Tier::from_label("Easy"), Some(Tier::Easy));
        assert_eq!(Tier::from_label("Medium"), Some(Tier::Medium));
        assert_eq!(Tier::from_label("Hard"), Some(Tier::Hard));
        assert_eq!(Tier::from_label("Unrated"), None);
        assert_eq!(Tier::from_label("easy"), None);
    }

    #[test]
    fn leaderboard_entry_tolerates_missing_tier() {
        let entry: LeaderboardEntry = serde_json::from_str(r#"{"username":"a","score":10}"#).unwrap();
        assert_eq!(entry.tier, None);
        let entry: LeaderboardEntry =
            serde_json::from_str(r#"{"username":"a","score":10,"tier":null}"#).unwrap();
        assert_eq!(entry.tier, None);
    }

    #[test]
    fn answer_flag_accepts_sqlite_integers() {
        let answer: Answer =
            serde_json::from_str(r#"{"id":1,"correct":1,"text":"Fake","feedback":null}"#).unwrap();
        assert!(answer.correct);
        let answer: Answer = serde_json::from_str(r#"{"id":2,"correct":false,"text":"Real"}"#).unwrap();
        assert!(!answer.correct);
    }

    #[test]
    fn question_finds_its_correct_answer() {
        let question: Question = serde_json::from_str(
            r#"{"question_id":7,"question_type":"image","question_text":"Which is fake?",
                "answers":[{"id":1,"correct":0,"text":"Left"},{"id":2,"correct":1,"text":"Right"}]}"#,
        )
        .unwrap();
        assert_eq!(question.correct_answer().map(|a| a.id), Some(2));
    }

    #[test]
    fn user_ignores_extra_login_fields() {
        let user: User =
            serde_json::from_str(r#"{"user_id":3,"username":"neo","message":"Login successful"}"#).unwrap();
        assert_eq!(user.user_id, 3);
        assert_eq!(user.username, "neo");
    }
}

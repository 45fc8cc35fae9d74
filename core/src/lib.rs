//! Synchronous API client core for the deepfake quiz.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `QuizClient` is stateless: it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Screens (`screens::HomeScreen`, `screens::LeaderboardScreen`) follow the
//!   same split and receive the signed-in user through an explicit `Session`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod screens;
pub mod session;
pub mod types;

pub use client::{QuizClient, DEFAULT_LEADERBOARD_LIMIT};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use types::{
    Answer, AnswerSubmission, LeaderboardEntry, Question, SubmitOutcome, Tier, TierResponse, User,
};

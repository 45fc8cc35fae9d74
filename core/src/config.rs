//! Client configuration read from the environment.

use std::env;

use thiserror::Error;

use crate::client::DEFAULT_LEADERBOARD_LIMIT;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LEADERBOARD_HEADING_COUNT: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be a positive whole number")]
    WrongFormat(&'static str),
}

/// Settings shared by every host.
///
/// `leaderboard_limit` is what gets fetched; `leaderboard_heading_count` is
/// only the number printed in the "Top N Players" heading. Neither
/// constrains the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub leaderboard_limit: u32,
    pub leaderboard_heading_count: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            leaderboard_heading_count: DEFAULT_LEADERBOARD_HEADING_COUNT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_url = lookup("QUIZ_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);
        let leaderboard_limit = parse_count(&lookup, "QUIZ_LEADERBOARD_LIMIT")?
            .unwrap_or(defaults.leaderboard_limit);
        let leaderboard_heading_count = parse_count(&lookup, "QUIZ_LEADERBOARD_HEADING_COUNT")?
            .unwrap_or(defaults.leaderboard_heading_count);

        Ok(Self {
            api_url,
            leaderboard_limit,
            leaderboard_heading_count,
        })
    }
}

fn parse_count<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::WrongFormat(name)),
        },
    }
}

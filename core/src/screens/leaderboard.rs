//! Leaderboard screen.

use tracing::{debug, warn};

use super::{Fetch, FetchOutcome, FetchTicket, LoadState, ScreenLifetime, TierColor, APP_TITLE};
use crate::client::QuizClient;
use crate::config::ClientConfig;
use crate::types::LeaderboardEntry;

pub const EMPTY_MESSAGE: &str = "No scores yet!";
pub const UNRATED: &str = "Unrated";
pub const COLUMNS: [&str; 3] = ["Username", "High Score", "Difficulty Tier"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub username: String,
    pub score: String,
    pub tier_label: String,
    pub tier_color: TierColor,
}

impl From<&LeaderboardEntry> for LeaderboardRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        let tier = entry.tier.as_deref().filter(|t| !t.is_empty());
        Self {
            username: entry.username.clone(),
            score: entry.score.to_string(),
            tier_label: tier.unwrap_or(UNRATED).to_string(),
            tier_color: TierColor::for_label(tier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardBody {
    Loading,
    Empty(&'static str),
    Rows(Vec<LeaderboardRow>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardView {
    pub title: &'static str,
    pub heading: String,
    pub body: LeaderboardBody,
}

#[derive(Debug)]
pub struct LeaderboardScreen {
    client: QuizClient,
    fetch_limit: u32,
    heading_count: u32,
    lifetime: ScreenLifetime,
    leaders: LoadState<Vec<LeaderboardEntry>>,
}

impl LeaderboardScreen {
    pub fn new(client: QuizClient, fetch_limit: u32, heading_count: u32) -> Self {
        Self {
            client,
            fetch_limit,
            heading_count,
            lifetime: ScreenLifetime::default(),
            leaders: LoadState::Loading,
        }
    }

    pub fn from_config(client: QuizClient, config: &ClientConfig) -> Self {
        Self::new(client, config.leaderboard_limit, config.leaderboard_heading_count)
    }

    pub fn mount(&mut self) -> Fetch {
        let ticket = self.lifetime.begin();
        self.leaders = LoadState::Loading;
        Fetch {
            ticket,
            request: self.client.build_get_leaderboard(self.fetch_limit),
        }
    }

    pub fn unmount(&mut self) {
        self.lifetime.end();
        self.leaders = LoadState::Loading;
    }

    /// Apply the leaderboard response. Returns `false` if the ticket is stale.
    pub fn receive(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if !self.lifetime.accepts(ticket) {
            debug!("discarding leaderboard response for an old mount");
            return false;
        }
        let parsed = outcome.and_then(|response| self.client.parse_get_leaderboard(response));
        self.leaders = match parsed {
            Ok(entries) => LoadState::Loaded(entries),
            Err(err) => {
                warn!(error = %err, "Failed to fetch leaderboard");
                LoadState::Failed(err.message())
            }
        };
        true
    }

    pub fn leaders(&self) -> &LoadState<Vec<LeaderboardEntry>> {
        &self.leaders
    }

    pub fn view(&self) -> LeaderboardView {
        let body = match &self.leaders {
            LoadState::Loading => LeaderboardBody::Loading,
            LoadState::Loaded(entries) if entries.is_empty() => LeaderboardBody::Empty(EMPTY_MESSAGE),
            LoadState::Loaded(entries) => LeaderboardBody::Rows(entries.iter().map(LeaderboardRow::from).collect()),
            LoadState::Failed(message) => LeaderboardBody::Error(format!("Could not load the leaderboard: {message}")),
        };
        LeaderboardView {
            title: APP_TITLE,
            heading: format!("Top {} Players", self.heading_count),
            body,
        }
    }
}

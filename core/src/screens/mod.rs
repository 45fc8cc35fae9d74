//! Screens: fetch what a page needs on mount and turn it into a view.
//!
//! # Design
//! Screens are sans-IO like the client. `mount` hands back a `Fetch` (the
//! request plus a `FetchTicket`), the host runs it, and `receive` applies the
//! outcome. Every mount or unmount moves the screen's `ScreenLifetime` on, so
//! a response that arrives for an older ticket is dropped instead of
//! overwriting newer state.

pub mod home;
pub mod leaderboard;

pub use home::{HomeScreen, HomeView, NavLink, TierBadge};
pub use leaderboard::{LeaderboardBody, LeaderboardRow, LeaderboardScreen, LeaderboardView};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Shown at the top of every screen.
pub const APP_TITLE: &str = "Detect the Deepfake";

/// Data a screen is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Proof that a response belongs to the current mount of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Tracks which mount of a screen is live.
#[derive(Debug, Default)]
pub struct ScreenLifetime {
    generation: u64,
    mounted: bool,
}

impl ScreenLifetime {
    /// Start a new mount, invalidating tickets from any previous one.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.mounted = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn end(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        self.mounted && ticket.generation == self.generation
    }
}

/// A request the host should execute on a screen's behalf.
#[derive(Debug, Clone)]
pub struct Fetch {
    pub ticket: FetchTicket,
    pub request: HttpRequest,
}

/// What the host got back: a response, or the reason it has none.
pub type FetchOutcome = Result<HttpResponse, ApiError>;

/// Display color for a tier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierColor {
    Green,
    Yellow,
    Red,
    Default,
}

impl TierColor {
    pub fn for_label(label: Option<&str>) -> Self {
        use crate::types::Tier;

        match label.and_then(Tier::from_label) {
            Some(Tier::Easy) => TierColor::Green,
            Some(Tier::Medium) => TierColor::Yellow,
            Some(Tier::Hard) => TierColor::Red,
            None => TierColor::Default,
        }
    }
}

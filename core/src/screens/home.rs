//! Landing screen: greeting, tier badge, navigation.

use tracing::{debug, warn};

use super::{Fetch, FetchOutcome, FetchTicket, LoadState, ScreenLifetime, TierColor, APP_TITLE};
use crate::client::QuizClient;
use crate::session::Session;
use crate::types::User;

const MOTIVATION: &str =
    "Play and try to reach the Easy tier: it means you're fast and accurate at spotting deepfakes!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: &'static str,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Start Game",
        route: "/play",
    },
    NavLink {
        label: "View Leaderboard",
        route: "/leaderboard",
    },
    NavLink {
        label: "Tutorial",
        route: "/tutorial",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBadge {
    pub label: String,
    pub color: TierColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub title: &'static str,
    pub greeting: Option<String>,
    pub tier_badge: Option<TierBadge>,
    /// Set when the tier could not be fetched.
    pub notice: Option<String>,
    pub links: Vec<NavLink>,
    pub motivation: Option<&'static str>,
}

/// `tier` is `None` when there is nobody to fetch a tier for, and
/// `Loaded(None)` when the backend has not rated the user yet.
#[derive(Debug)]
pub struct HomeScreen {
    client: QuizClient,
    lifetime: ScreenLifetime,
    user: Option<User>,
    tier: Option<LoadState<Option<String>>>,
}

impl HomeScreen {
    pub fn new(client: QuizClient) -> Self {
        Self {
            client,
            lifetime: ScreenLifetime::default(),
            user: None,
            tier: None,
        }
    }

    /// Mount for `session`. Call again whenever the session's user changes.
    ///
    /// Returns the tier request when a user is signed in.
    pub fn mount(&mut self, session: &Session) -> Option<Fetch> {
        let ticket = self.lifetime.begin();
        self.user = session.user().cloned();
        self.tier = None;
        let user = self.user.as_ref()?;
        self.tier = Some(LoadState::Loading);
        Some(Fetch {
            ticket,
            request: self.client.build_get_my_tier(user.user_id),
        })
    }

    /// Drop all state. Responses still in flight are ignored.
    pub fn unmount(&mut self) {
        self.lifetime.end();
        self.user = None;
        self.tier = None;
    }

    /// Apply the tier response. Returns `false` if the ticket is stale and the
    /// outcome was discarded.
    pub fn receive(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if !self.lifetime.accepts(ticket) {
            debug!("discarding tier response for an old mount");
            return false;
        }
        let parsed = outcome.and_then(|response| self.client.parse_get_my_tier(response));
        self.tier = Some(match parsed {
            Ok(data) => LoadState::Loaded(data.tier.filter(|t| !t.is_empty())),
            Err(err) => {
                warn!(error = %err, "Failed to fetch tier");
                LoadState::Failed(err.message())
            }
        });
        true
    }

    pub fn tier(&self) -> Option<&LoadState<Option<String>>> {
        self.tier.as_ref()
    }

    pub fn view(&self) -> HomeView {
        let user = self.user.as_ref();
        let tier_badge = self
            .tier
            .as_ref()
            .and_then(LoadState::loaded)
            .and_then(Option::as_ref)
            .filter(|_| user.is_some())
            .map(|label| TierBadge {
                label: label.clone(),
                color: TierColor::for_label(Some(label.as_str())),
            });
        let notice = match &self.tier {
            Some(LoadState::Failed(message)) => Some(format!("Could not load your tier: {message}")),
            _ => None,
        };

        HomeView {
            title: APP_TITLE,
            greeting: user.map(|u| format!("Welcome back, {}!", u.username)),
            tier_badge,
            notice,
            links: NAV_LINKS.to_vec(),
            motivation: user.map(|_| MOTIVATION),
        }
    }
}

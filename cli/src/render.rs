//! Terminal rendering for screen views.

use std::fmt::Write;

use crossterm::style::{style, Color, Stylize};
use quiz_core::screens::leaderboard::COLUMNS;
use quiz_core::screens::{HomeView, LeaderboardBody, LeaderboardView, TierColor};
use quiz_core::{Question, SubmitOutcome};

const USERNAME_WIDTH: usize = 20;
const SCORE_WIDTH: usize = 10;

fn paint(text: &str, color: TierColor, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let ansi = match color {
        TierColor::Green => Color::Green,
        TierColor::Yellow => Color::Yellow,
        TierColor::Red => Color::Red,
        TierColor::Default => Color::Grey,
    };
    style(text).with(ansi).to_string()
}

pub fn home(view: &HomeView, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", view.title);
    if let Some(greeting) = &view.greeting {
        let _ = writeln!(out, "{greeting}");
    }
    if let Some(badge) = &view.tier_badge {
        let _ = writeln!(out, "Your Tier: {}", paint(&badge.label, badge.color, color));
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{notice}");
    }
    out.push('\n');
    for link in &view.links {
        let _ = writeln!(out, "  {:<18} {}", link.label, link.route);
    }
    if let Some(motivation) = view.motivation {
        let _ = writeln!(out, "\n{motivation}");
    }
    out
}

pub fn leaderboard(view: &LeaderboardView, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", view.title);
    let _ = writeln!(out, "{}\n", view.heading);
    match &view.body {
        LeaderboardBody::Loading => out.push_str("Loading...\n"),
        LeaderboardBody::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        LeaderboardBody::Error(message) => {
            let _ = writeln!(out, "{message}");
        }
        LeaderboardBody::Rows(rows) => {
            let _ = writeln!(
                out,
                "{:<USERNAME_WIDTH$} {:>SCORE_WIDTH$}  {}",
                COLUMNS[0], COLUMNS[1], COLUMNS[2]
            );
            let _ = writeln!(out, "{}", "-".repeat(USERNAME_WIDTH + SCORE_WIDTH + 3 + COLUMNS[2].len()));
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<USERNAME_WIDTH$} {:>SCORE_WIDTH$}  {}",
                    row.username,
                    row.score,
                    paint(&row.tier_label, row.tier_color, color)
                );
            }
        }
    }
    out
}

pub fn question(question: &Question, media_url: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Question {} ({})", question.question_id, question.question_type);
    let _ = writeln!(out, "{}", question.question_text);
    if let Some(url) = media_url {
        let _ = writeln!(out, "Media: {url}");
    }
    for answer in &question.answers {
        let _ = writeln!(out, "  [{}] {}", answer.id, answer.text);
    }
    out
}

pub fn outcome(outcome: &SubmitOutcome, feedback: Option<&str>, color: bool) -> String {
    let mut out = String::new();
    let verdict = if outcome.correct { "Correct!" } else { "Not quite." };
    let _ = writeln!(out, "{verdict} +{} points", outcome.earned);
    if let Some(feedback) = feedback {
        let _ = writeln!(out, "{feedback}");
    }
    if let Some(tier) = outcome.tier.as_deref() {
        let _ = writeln!(out, "Tier: {}", paint(tier, TierColor::for_label(Some(tier)), color));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::screens::{LeaderboardRow, NavLink, TierBadge};

    fn row(username: &str, score: &str, tier: &str, color: TierColor) -> LeaderboardRow {
        LeaderboardRow {
            username: username.to_string(),
            score: score.to_string(),
            tier_label: tier.to_string(),
            tier_color: color,
        }
    }

    fn board(body: LeaderboardBody) -> LeaderboardView {
        LeaderboardView {
            title: "Detect the Deepfake",
            heading: "Top 5 Players".to_string(),
            body,
        }
    }

    #[test]
    fn leaderboard_rows_in_order() {
        let text = leaderboard(
            &board(LeaderboardBody::Rows(vec![
                row("a", "10", "Easy", TierColor::Green),
                row("b", "3", "Unrated", TierColor::Default),
            ])),
            false,
        );
        assert!(text.contains("Top 5 Players"));
        assert!(text.contains("Difficulty Tier"));
        let a = text.find("a                            10  Easy").unwrap();
        let b = text.find("Unrated").unwrap();
        assert!(a < b);
    }

    #[test]
    fn leaderboard_empty_and_error_differ() {
        let empty = leaderboard(&board(LeaderboardBody::Empty("No scores yet!")), false);
        let failed = leaderboard(&board(LeaderboardBody::Error("Could not load the leaderboard: down".into())), false);
        assert!(empty.contains("No scores yet!"));
        assert!(!failed.contains("No scores yet!"));
        assert!(failed.contains("down"));
    }

    #[test]
    fn colored_tier_carries_ansi_codes() {
        crossterm::style::force_color_output(true);
        let text = leaderboard(&board(LeaderboardBody::Rows(vec![row("a", "10", "Easy", TierColor::Green)])), true);
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Easy"));
    }

    #[test]
    fn home_with_badge() {
        let view = HomeView {
            title: "Detect the Deepfake",
            greeting: Some("Welcome back, neo!".to_string()),
            tier_badge: Some(TierBadge {
                label: "Medium".to_string(),
                color: TierColor::Yellow,
            }),
            notice: None,
            links: vec![NavLink {
                label: "Start Game",
                route: "/play",
            }],
            motivation: None,
        };
        let text = home(&view, false);
        assert!(text.contains("Welcome back, neo!"));
        assert!(text.contains("Your Tier: Medium"));
        assert!(text.contains("Start Game"));
    }
}

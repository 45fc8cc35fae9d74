//! Subcommand implementations. Each one builds requests with the core
//! client, runs them through the transport, and prints the result.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context};
use quiz_core::screens::{HomeScreen, LeaderboardScreen};
use quiz_core::{AnswerSubmission, ClientConfig, QuizClient, Session};
use tracing::info;

use crate::render;
use crate::transport::Transport;
use crate::{Credentials, MaybeCredentials};

/// Points awarded for a correct answer.
const POINTS_PER_CORRECT: i64 = 10;

pub struct App {
    config: ClientConfig,
    client: QuizClient,
    transport: Transport,
    color: bool,
}

impl App {
    pub fn new(config: ClientConfig, color: bool) -> Self {
        let client = QuizClient::new(&config.api_url);
        Self {
            config,
            client,
            transport: Transport::new(),
            color,
        }
    }

    fn sign_in(&self, credentials: &Credentials) -> anyhow::Result<Session> {
        let request = self.client.build_login_user(&credentials.username, &credentials.password)?;
        let user = self.client.parse_login_user(self.transport.execute(request)?)?;
        info!(user_id = user.user_id, "signed in");
        Ok(Session::signed_in(user))
    }

    pub fn home(&self, credentials: &MaybeCredentials) -> anyhow::Result<()> {
        let session = match (&credentials.username, &credentials.password) {
            (Some(username), Some(password)) => self.sign_in(&Credentials {
                username: username.clone(),
                password: password.clone(),
            })?,
            _ => Session::anonymous(),
        };

        let mut screen = HomeScreen::new(self.client.clone());
        if let Some(fetch) = screen.mount(&session) {
            screen.receive(fetch.ticket, self.transport.execute(fetch.request));
        }
        print!("{}", render::home(&screen.view(), self.color));
        screen.unmount();
        Ok(())
    }

    pub fn leaderboard(&self, limit: Option<u32>, heading_count: Option<u32>) -> anyhow::Result<()> {
        let mut screen = LeaderboardScreen::new(
            self.client.clone(),
            limit.unwrap_or(self.config.leaderboard_limit),
            heading_count.unwrap_or(self.config.leaderboard_heading_count),
        );
        let fetch = screen.mount();
        screen.receive(fetch.ticket, self.transport.execute(fetch.request));
        print!("{}", render::leaderboard(&screen.view(), self.color));
        screen.unmount();
        Ok(())
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let request = self.client.build_register_user(&payload)?;
        let reply = self.client.parse_register_user(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Registered."));
        Ok(())
    }

    pub fn login(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let session = self.sign_in(credentials)?;
        if let Some(user) = session.user() {
            println!("Signed in as {} (user id {})", user.username, user.user_id);
        }
        Ok(())
    }

    pub fn tier(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let session = self.sign_in(credentials)?;
        let user = session.user().context("login returned no user")?;
        let request = self.client.build_get_my_tier(user.user_id);
        let tier = self.client.parse_get_my_tier(self.transport.execute(request)?)?;
        println!("{}", tier.tier.as_deref().unwrap_or("Unrated"));
        Ok(())
    }

    pub fn play(&self, credentials: &Credentials, question_id: Option<i64>, answer: Option<i64>) -> anyhow::Result<()> {
        let session = self.sign_in(credentials)?;
        let user = session.user().context("login returned no user")?;

        let question = match question_id {
            Some(id) => {
                let response = self.transport.execute(self.client.build_get_question(id))?;
                self.client.parse_get_question(response)?
            }
            None => {
                let response = self.transport.execute(self.client.build_get_random_question())?;
                self.client.parse_get_random_question(response)?
            }
        };
        let correct = question
            .correct_answer()
            .context("question has no correct answer")?
            .clone();

        let media = self
            .transport
            .execute(self.client.build_get_question_media(question.question_id))
            .and_then(|response| self.client.parse_get_question_media(response));
        let media_url = match media {
            Ok(data) => data["media_path"].as_str().map(|path| self.client.full_media_url(path)),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch media");
                None
            }
        };
        print!("{}", render::question(&question, media_url.as_deref()));

        let started = Instant::now();
        let selected_id = match answer {
            Some(id) => id,
            None => prompt_answer()?,
        };
        let Some(selected) = question.answers.iter().find(|a| a.id == selected_id) else {
            bail!("{selected_id} is not one of the listed answers");
        };
        let response_time_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

        let submission = AnswerSubmission {
            user_id: user.user_id,
            question_id: question.question_id,
            selected_id,
            correct_id: correct.id,
            score_earned: if selected_id == correct.id { POINTS_PER_CORRECT } else { 0 },
            response_time_ms,
        };
        let request = self.client.build_submit_answer(&submission)?;
        let outcome = self.client.parse_submit_answer(self.transport.execute(request)?)?;
        print!("{}", render::outcome(&outcome, selected.feedback.as_deref(), self.color));
        Ok(())
    }

    pub fn submit_score(&self, credentials: &Credentials, score: i64) -> anyhow::Result<()> {
        let session = self.sign_in(credentials)?;
        let user = session.user().context("login returned no user")?;
        let request = self.client.build_submit_score(user.user_id, score)?;
        let reply = self.client.parse_submit_score(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Score submitted."));
        Ok(())
    }

    pub fn media(&self, question_id: i64) -> anyhow::Result<()> {
        let response = self.transport.execute(self.client.build_get_question_media(question_id))?;
        let media = self.client.parse_get_question_media(response)?;
        println!("{}", serde_json::to_string_pretty(&media)?);
        if let Some(path) = media["media_path"].as_str() {
            println!("{}", self.client.full_media_url(path));
        }
        Ok(())
    }

    pub fn email(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let request = self.client.build_get_email(&credentials.username, &credentials.password);
        let email = self.client.parse_get_email(self.transport.execute(request)?)?;
        println!("{email}");
        Ok(())
    }

    pub fn rename(&self, credentials: &Credentials, new_username: &str) -> anyhow::Result<()> {
        let request = self
            .client
            .build_update_username(&credentials.username, &credentials.password, new_username)?;
        let reply = self.client.parse_update_username(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Username updated."));
        Ok(())
    }

    pub fn change_password(&self, username: &str, current_password: &str, new_password: &str) -> anyhow::Result<()> {
        let request = self
            .client
            .build_update_password(username, current_password, new_password)?;
        let reply = self.client.parse_update_password(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Password updated."));
        Ok(())
    }

    pub fn change_email(&self, credentials: &Credentials, email: &str, new_email: &str) -> anyhow::Result<()> {
        let request = self
            .client
            .build_update_email(&credentials.username, &credentials.password, email, new_email)?;
        let reply = self.client.parse_update_email(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Email updated."));
        Ok(())
    }

    pub fn deactivate(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let request = self
            .client
            .build_deactivate_account(&credentials.username, &credentials.password)?;
        let reply = self.client.parse_deactivate_account(self.transport.execute(request)?)?;
        println!("{}", message_or(&reply, "Account deactivated."));
        Ok(())
    }
}

fn message_or<'a>(reply: &'a serde_json::Value, fallback: &'a str) -> &'a str {
    reply["message"].as_str().unwrap_or(fallback)
}

fn prompt_answer() -> anyhow::Result<i64> {
    print!("Your answer: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("{:?} is not an answer id", line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_server() -> String {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        format!("http://{addr}")
    }

    fn app(api_url: String) -> App {
        App::new(
            ClientConfig {
                api_url,
                ..ClientConfig::default()
            },
            false,
        )
    }

    fn neo() -> Credentials {
        Credentials {
            username: "neo".to_string(),
            password: "redpill".to_string(),
        }
    }

    #[test]
    fn commands_against_mock_backend() {
        let app = app(start_server());

        app.register("neo", "neo@zion.io", "redpill").unwrap();
        app.login(&neo()).unwrap();
        app.play(&neo(), Some(2), Some(4)).unwrap();
        app.tier(&neo()).unwrap();
        app.submit_score(&neo(), 40).unwrap();
        app.leaderboard(None, None).unwrap();
        app.home(&MaybeCredentials {
            username: Some("neo".to_string()),
            password: Some("redpill".to_string()),
        })
        .unwrap();
        app.media(1).unwrap();
        app.email(&neo()).unwrap();
        app.change_email(&neo(), "neo@zion.io", "one@zion.io").unwrap();
        app.rename(&neo(), "the_one").unwrap();
        app.change_password("the_one", "redpill", "bluepill").unwrap();
        app.deactivate(&Credentials {
            username: "the_one".to_string(),
            password: "bluepill".to_string(),
        })
        .unwrap();
    }

    #[test]
    fn failures_surface_the_backend_message() {
        let app = app(start_server());

        let err = app.login(&neo()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");

        app.register("neo", "neo@zion.io", "redpill").unwrap();
        let err = app.play(&neo(), Some(1), Some(99)).unwrap_err();
        assert_eq!(err.to_string(), "99 is not one of the listed answers");

        let err = app.rename(&neo(), "").unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields for username update");
    }

    #[test]
    fn unreachable_backend_still_renders_screens() {
        let app = app("http://127.0.0.1:9".to_string());
        app.leaderboard(Some(3), None).unwrap();
        app.home(&MaybeCredentials {
            username: None,
            password: None,
        })
        .unwrap();
    }

    #[test]
    fn message_or_prefers_server_message() {
        let reply = serde_json::json!({"message": "Account deactivated"});
        assert_eq!(message_or(&reply, "fallback"), "Account deactivated");
        assert_eq!(message_or(&serde_json::json!({}), "fallback"), "fallback");
    }
}

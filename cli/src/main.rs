//! `deepfake-quiz`: terminal client for the deepfake quiz backend.
//!
//! Configuration comes from the environment (a `.env` file is loaded first):
//! `QUIZ_API_URL`, `QUIZ_LEADERBOARD_LIMIT`, `QUIZ_LEADERBOARD_HEADING_COUNT`.
//! Flags override the environment. Logging goes to stderr and is filtered
//! with `RUST_LOG` (default `warn`).

mod commands;
mod render;
mod transport;

use clap::{Args, Parser, Subcommand};
use quiz_core::ClientConfig;
use tracing_subscriber::EnvFilter;

use commands::App;

#[derive(Parser, Debug)]
#[command(name = "deepfake-quiz", about = "Spot the deepfake, from your terminal")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print without ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct Credentials {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub password: String,
}

#[derive(Args, Debug, Clone)]
pub struct MaybeCredentials {
    #[arg(short, long, requires = "password")]
    pub username: Option<String>,
    #[arg(short, long, requires = "username")]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing screen; sign in to see your tier
    Home(MaybeCredentials),
    /// Top players
    Leaderboard {
        /// Number of entries to fetch
        #[arg(long)]
        limit: Option<u32>,
        /// Number shown in the "Top N Players" heading
        #[arg(long)]
        heading_count: Option<u32>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Check credentials and print the user record
    Login(Credentials),
    /// Print your difficulty tier
    Tier(Credentials),
    /// Answer one question
    Play {
        #[command(flatten)]
        credentials: Credentials,
        /// Question to play; a random one when omitted
        #[arg(long)]
        question: Option<i64>,
        /// Answer id; prompted for when omitted
        #[arg(long)]
        answer: Option<i64>,
    },
    /// Record a final score on the leaderboard
    SubmitScore {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        score: i64,
    },
    /// Show media metadata and the asset URL for a question
    Media { question_id: i64 },
    /// Account settings
    Account {
        #[command(subcommand)]
        action: AccountCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Email(Credentials),
    Rename {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        new_username: String,
    },
    Password {
        #[arg(short, long)]
        username: String,
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        new_password: String,
    },
    ChangeEmail {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_email: String,
    },
    Deactivate(Credentials),
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    let app = App::new(config, !cli.no_color);

    match cli.command {
        Command::Home(credentials) => app.home(&credentials),
        Command::Leaderboard { limit, heading_count } => app.leaderboard(limit, heading_count),
        Command::Register {
            username,
            email,
            password,
        } => app.register(&username, &email, &password),
        Command::Login(credentials) => app.login(&credentials),
        Command::Tier(credentials) => app.tier(&credentials),
        Command::Play {
            credentials,
            question,
            answer,
        } => app.play(&credentials, question, answer),
        Command::SubmitScore { credentials, score } => app.submit_score(&credentials, score),
        Command::Media { question_id } => app.media(question_id),
        Command::Account { action } => match action {
            AccountCommand::Email(c) => app.email(&c),
            AccountCommand::Rename {
                credentials,
                new_username,
            } => app.rename(&credentials, &new_username),
            AccountCommand::Password {
                username,
                current_password,
                new_password,
            } => app.change_password(&username, &current_password, &new_password),
            AccountCommand::ChangeEmail {
                credentials,
                email,
                new_email,
            } => app.change_email(&credentials, &email, &new_email),
            AccountCommand::Deactivate(c) => app.deactivate(&c),
        },
    }
}

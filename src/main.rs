#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use review_admin::app::{ReviewApp, event_queue};
use review_admin::config::{
    ClientConfig, ConfigError, ENV_API_BASE_URL, ENV_COMMENTS_URL, ENV_CONNECT_TIMEOUT_SECS, ENV_CSRF_HEADER,
    ENV_CSRF_TOKEN, ENV_PAGE_ID, ENV_REQUEST_TIMEOUT_SECS, ENV_SESSION_COOKIE, ENV_SHARES_URL,
};
use review_admin::net::page::PageApi;
use review_admin::net::reviewer::ReviewerApi;
use review_admin::net::transport::{HttpTransport, Transport};
use review_admin::net::types::{ApiError, CreateOutcome, ValidationErrors};
use review_admin::services;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("request rejected")]
    Rejected,
    #[error("pass exactly one of --email or --user-id")]
    ReviewerTarget,
}

/// Connection settings are kept as raw strings and parsed by
/// `ClientConfig::from_lookup`, so flags and env vars follow the same rules.
#[derive(Parser, Debug)]
#[command(name = "review-admin", about = "Page review admin API client")]
struct Cli {
    #[arg(long, env = ENV_API_BASE_URL)]
    api_base_url: Option<String>,

    #[arg(long, env = ENV_PAGE_ID)]
    page_id: Option<String>,

    #[arg(long, env = ENV_SHARES_URL)]
    shares_url: Option<String>,

    #[arg(long, env = ENV_COMMENTS_URL)]
    comments_url: Option<String>,

    #[arg(long, env = ENV_CSRF_HEADER)]
    csrf_header: Option<String>,

    #[arg(long, env = ENV_CSRF_TOKEN)]
    csrf_token: Option<String>,

    #[arg(long, env = ENV_SESSION_COOKIE)]
    session_cookie: Option<String>,

    #[arg(long, env = ENV_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: Option<String>,

    #[arg(long, env = ENV_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load shares and comments for the page and summarise them.
    Load,
    /// Share the page with an email address.
    Share(ShareArgs),
    /// Add a reviewer by admin user id or external email.
    Reviewer(ReviewerArgs),
    /// Search admin users.
    Users(UsersArgs),
}

#[derive(Args, Debug)]
struct ShareArgs {
    email: String,
    #[arg(long)]
    expires_at: Option<String>,
}

#[derive(Args, Debug)]
struct ReviewerArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    user_id: Option<i64>,
}

#[derive(Args, Debug)]
struct UsersArgs {
    #[arg(long, default_value = "")]
    search: String,
}

impl Cli {
    fn setting(&self, key: &str) -> Option<String> {
        let value = match key {
            ENV_API_BASE_URL => &self.api_base_url,
            ENV_PAGE_ID => &self.page_id,
            ENV_SHARES_URL => &self.shares_url,
            ENV_COMMENTS_URL => &self.comments_url,
            ENV_CSRF_HEADER => &self.csrf_header,
            ENV_CSRF_TOKEN => &self.csrf_token,
            ENV_SESSION_COOKIE => &self.session_cookie,
            ENV_REQUEST_TIMEOUT_SECS => &self.request_timeout_secs,
            ENV_CONNECT_TIMEOUT_SECS => &self.connect_timeout_secs,
            _ => return None,
        };
        value.clone()
    }

    fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_lookup(|key| self.setting(key))
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.client_config()?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);

    let (events, queue) = event_queue();
    let mut app = ReviewApp::new();

    let result = match cli.command {
        Command::Load => {
            let api = PageApi::new(transport, &config)?;
            let (shares, comments) =
                tokio::join!(services::page::load_shares(&api, &events), services::page::load_comments(&api, &events));
            shares?;
            comments?;
            Ok(())
        }
        Command::Share(args) => {
            let api = PageApi::new(transport, &config)?;
            let outcome =
                services::page::create_share(&api, &events, &args.email, args.expires_at.as_deref()).await?;
            report(outcome)
        }
        Command::Reviewer(args) => {
            let api = ReviewerApi::new(transport, &config);
            let outcome = match (args.user_id, args.email.as_deref()) {
                (Some(user_id), None) => services::reviewers::add_internal_reviewer(&api, &events, user_id).await?,
                (None, Some(email)) => services::reviewers::add_external_reviewer(&api, &events, email).await?,
                _ => return Err(CliError::ReviewerTarget),
            };
            report(outcome)
        }
        Command::Users(args) => {
            let api = ReviewerApi::new(transport, &config);
            for user in services::reviewers::search_users(&api, &args.search).await? {
                println!("{}\t{}", user.id, user.name);
            }
            Ok(())
        }
    };

    drop(events);
    let applied = app.run(queue).await;
    tracing::info!(
        applied,
        shares = app.share.state().shares.len(),
        comments = app.comments.state().comments.len(),
        unresolved = app.comments_badge().unwrap_or(0),
        reviewers = app.reviewers.state().reviewers.len(),
        "review-admin done"
    );

    for share in &app.share.state().shares {
        println!("share\t{}\t{}", share.id, share.email);
    }
    for reviewer in &app.reviewers.state().reviewers {
        println!("reviewer\t{}\t{}", reviewer.id, reviewer.display());
    }
    for comment in app.comments.state().visible_comments() {
        println!("comment\t{}\t{}\t{}", comment.id, comment.author.name, comment.text);
    }

    result
}

fn report<T>(outcome: CreateOutcome<T>) -> Result<(), CliError> {
    match outcome {
        CreateOutcome::Ok(_) => Ok(()),
        CreateOutcome::Error(errors) => {
            print_validation_errors(&errors);
            Err(CliError::Rejected)
        }
    }
}

fn print_validation_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
}

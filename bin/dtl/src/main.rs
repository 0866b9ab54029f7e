//! # dtl
//!
//! Command-line front end for the Daily Topics service: log in, read the
//! topic feed, browse categories and manage favorites.

mod commands;
mod render;

use std::{process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use dtl_client::{ApiClient, ClientConfig, ClientError, FileTokenStore, Session};

use commands::{CategoryCommands, FavoriteCommands, TopicCommands};

#[derive(Parser, Debug)]
#[command(name = "dtl")]
#[command(about = "Read and collect daily learning topics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// API base URL (overrides DTL_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in with your email address
    Login {
        #[arg(long)]
        email: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Forget the stored login
    Logout,
    /// Read topics one at a time
    Feed,
    /// Show today's topic
    Daily,
    /// Topic operations
    #[command(subcommand)]
    Topics(TopicCommands),
    /// Category operations
    #[command(subcommand)]
    Categories(CategoryCommands),
    /// Favorite topic operations
    #[command(subcommand)]
    Favorites(FavoriteCommands),
    /// Show your profile and favorites
    Profile,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    dtl_client::tracing::init_tracing(&config.env);

    let store = Arc::new(FileTokenStore::new(config.storage_path()));
    tracing::debug!(path = %store.path().display(), "Using token storage");
    let session = Session::new(ApiClient::new(&config, store)?);

    match cli.command {
        Commands::Login { email } => commands::auth::login(&session, &email).await,
        Commands::Register { name, email } => commands::auth::register(&session, &name, &email).await,
        Commands::Logout => commands::auth::logout(&session),
        Commands::Feed => commands::feed::run(&session).await,
        Commands::Daily => commands::topics::daily(&session).await,
        Commands::Topics(cmd) => commands::topics::handle(&session, cmd).await,
        Commands::Categories(cmd) => commands::categories::handle(&session, cmd).await,
        Commands::Favorites(cmd) => commands::favorites::handle(&session, cmd).await,
        Commands::Profile => commands::profile::show(&session).await,
    }
}

/// User-facing text for a failed command
fn describe(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ClientError>() {
        Some(ClientError::NotLoggedIn) => {
            "Not logged in. Run `dtl login --email <EMAIL>` first.".to_string()
        }
        Some(client_error) => client_error.user_message(),
        None => e.to_string(),
    }
}

//! Command-line client for the music subscription gateway.
//!
//! Each subcommand runs one screen action against the gateway and exits,
//! except `shell`, which keeps a dashboard open and logs out on expiry.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use shared::config::ClientConfig;
use shared::models::music::QueryFilters;

mod app;
mod commands;
mod render;
mod shell;

use app::App;

#[derive(Parser)]
#[command(name = "music-client")]
#[command(about = "Search music and manage subscriptions", long_about = None)]
struct Cli {
    /// Log request details at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Where the session is stored (overrides MUSIC_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds (overrides MUSIC_TIMEOUT_SECONDS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "")]
    year: String,

    #[arg(long, default_value = "")]
    artist: String,

    #[arg(long, default_value = "")]
    album: String,
}

impl From<FilterArgs> for QueryFilters {
    fn from(args: FilterArgs) -> Self {
        QueryFilters {
            title: args.title,
            year: args.year,
            artist: args.artist,
            album: args.album,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and show the dashboard
    Login {
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        email: String,
        user_name: String,

        #[arg(long)]
        password: String,
    },

    /// Show the logged-in user and their subscriptions
    Profile,

    /// Search for music; at least one filter is required
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Search, then subscribe to one of the results
    Subscribe {
        #[command(flatten)]
        filters: FilterArgs,

        /// Result number to subscribe to, as listed by `query`
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        result: u64,
    },

    /// List current subscriptions
    Subscriptions,

    /// Remove a subscription by its uuid
    Unsubscribe { uuid: String },

    /// Forget the stored session
    Logout,

    /// Interactive dashboard
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout = Duration::from_secs(secs);
    }
    debug!("Session file: {}", config.session_file.display());

    let app = App::build(config)?;

    match cli.command {
        Commands::Login { email, password } => commands::login(&app, email, password).await,
        Commands::Register {
            email,
            user_name,
            password,
        } => commands::register(&app, email, user_name, password).await,
        Commands::Profile => commands::profile(&app).await,
        Commands::Query { filters } => commands::query(&app, filters.into()).await,
        Commands::Subscribe { filters, result } => {
            commands::subscribe(&app, filters.into(), result as usize).await
        }
        Commands::Subscriptions => commands::subscriptions(&app).await,
        Commands::Unsubscribe { uuid } => commands::unsubscribe(&app, uuid).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Shell => shell::run(&app).await,
    }
}

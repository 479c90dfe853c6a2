// contrib-board - contributor leaderboards and activity from snapshot files

mod commands;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contrib_board::utils::config::Config;
use contrib_board::{Period, SnapshotStore};

#[derive(Debug, Parser)]
#[command(name = "contrib-board")]
#[command(about = "Contributor leaderboards, activity feed and profiles")]
struct Cli {
    /// Directory holding <period>.json snapshots (overrides LEADERBOARD_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ranked leaderboard for week, month or year
    Leaderboard {
        period: Option<Period>,
        /// Page query string, e.g. "roles=core&sort=reviews&page=2&limit=25"
        #[arg(long, default_value = "")]
        query: String,
        /// Filter by name or username; ranks are unaffected
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Home page summary and recent activity
    Home,
    /// Profile statistics for one contributor
    Contributor {
        username: String,
        period: Option<Period>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "contrib_board=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    info!("Reading snapshots from {}", config.data_dir.display());
    let store = SnapshotStore::new(&config.data_dir);

    match cli.command.unwrap_or(Commands::Home) {
        Commands::Leaderboard {
            period,
            query,
            search,
        } => {
            let period = period.unwrap_or(config.default_period);
            commands::leaderboard::run(&store, period, &query, &search).await?;
        }
        Commands::Home => {
            commands::home::run(&store).await?;
        }
        Commands::Contributor { username, period } => {
            let period = period.unwrap_or(config.default_period);
            commands::contributor::run(&store, &username, period).await?;
        }
    }

    Ok(())
}

//! huginn - news feed CLI client
//!
//! Fetches news through the resilient client and prints JSON.

use clap::{Parser, Subcommand};
use serde::Serialize;

use huginn::config::Config;
use huginn::{CacheMode, NewsQuery};

/// Huginn CLI client
#[derive(Parser)]
#[command(name = "huginn")]
#[command(version = huginn::PKG_VERSION)]
#[command(about = "Resilient news feed client")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Hostname used for deployment detection (overrides the config file).
    #[arg(long, env = "HUGINN_HOSTNAME")]
    hostname: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of news
    News {
        /// Category filter (default: all)
        #[arg(short, long)]
        category: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(short, long, default_value_t = huginn::types::DEFAULT_PAGE_SIZE)]
        limit: u32,
        /// Skip the response cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Fetch a single news item
    Item {
        /// News item id
        id: u64,
    },

    /// List news categories
    Categories,

    /// Show the selected endpoint and health flags
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(hostname) = args.hostname {
        config.deployment.hostname = hostname;
    }

    tracing::info!(version = huginn::version_string(), hostname = %config.deployment.hostname, "huginn starting");
    let client = config.builder().connect().await?;

    match args.command {
        Command::News {
            category,
            page,
            limit,
            no_cache,
        } => {
            let mut query = NewsQuery::new().page(page).limit(limit);
            if let Some(category) = category {
                query = query.category(category);
            }
            if no_cache {
                query = query.cache(CacheMode::Bypass);
            }
            print_json(&client.fetch_news(&query).await)?;
        }
        Command::Item { id } => {
            print_json(&client.fetch_news_item(id).await?)?;
        }
        Command::Categories => {
            print_json(&client.fetch_categories().await)?;
        }
        Command::Status => {
            print_json(&client.status())?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

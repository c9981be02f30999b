//! CLI administration tool for the short URL service.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- create https://example.com
//!
//! # Look up a slug
//! cargo run --bin admin -- resolve k3x9qa
//!
//! # Check database connection and schema
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the service (`DATABASE_URL` or `DB_*`); the
//! in-memory store is not available here.

use shorturl::application::services::ShortUrlService;
use shorturl::config::{self, Config};
use shorturl::error::AppError;
use shorturl::infrastructure::persistence::{PgShortUrlRepository, connect_pg};
use shorturl::utils::slug_generator::SlugGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for managing the short URL store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Create {
        /// Destination URL
        url: String,
    },

    /// Show the URL bound to a slug
    Resolve {
        /// Six-character slug
        slug: String,
    },

    /// Show the number of stored short URLs
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,

    /// Show database info
    Info,
}

type PgShortUrlService = ShortUrlService<PgShortUrlRepository, SlugGenerator>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect(&config).await?;

    let service = ShortUrlService::new(
        Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(SlugGenerator::new()),
    );

    match cli.command {
        Commands::Create { url } => create(&service, &url).await,
        Commands::Resolve { slug } => resolve(&service, &slug).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    }
}

async fn connect(config: &Config) -> Result<PgPool> {
    if !config.is_durable() {
        anyhow::bail!("DATABASE_URL (or DB_NAME with DB_USER/DB_PASSWORD) must be set");
    }

    connect_pg(config).await
}

/// Creates a short URL through the same retry policy as the HTTP API.
async fn create(service: &PgShortUrlService, url: &str) -> Result<ExitCode> {
    let short_url = service
        .create_short_url(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    println!("  Slug: {}", short_url.slug.bright_yellow().bold());
    println!("  URL:  {}", short_url.original_url.cyan());
    println!();

    Ok(ExitCode::SUCCESS)
}

/// Prints the record for `slug`, exiting with status 1 if it does not exist.
async fn resolve(service: &PgShortUrlService, slug: &str) -> Result<ExitCode> {
    match service.resolve(slug).await {
        Ok(short_url) => {
            println!("  Slug:    {}", short_url.slug.bright_yellow());
            println!("  URL:     {}", short_url.original_url.cyan());
            println!(
                "  Created: {}",
                short_url
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(AppError::NotFound { .. }) => {
            println!("{} {}", "❌ No short URL for".red(), slug.bright_white());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }
}

/// Displays the number of stored short URLs.
async fn handle_stats(pool: &PgPool) -> Result<ExitCode> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await?;

    println!("  Short URLs: {}", count.to_string().bright_green().bold());

    Ok(ExitCode::SUCCESS)
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<ExitCode> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;
            sqlx::query("SELECT 1 FROM short_urls LIMIT 1")
                .fetch_optional(pool)
                .await
                .context("Table short_urls is missing")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! CLI administration tool for url-alias.
//!
//! Talks to PostgreSQL directly, without the HTTP API and without the cache.
//!
//! # Usage
//!
//! ```bash
//! # Save a mapping (prompts for the URL when omitted)
//! cargo run --bin admin -- save https://example.com --alias docs
//!
//! # Look an alias up
//! cargo run --bin admin -- resolve docs
//!
//! # Show the newest mappings
//! cargo run --bin admin -- list --limit 20
//!
//! # Count mappings
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db init
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`
//! - `ALIAS_LENGTH` - Length of generated aliases (default: 6)

use url_alias::application::services::{SaveService, ServiceSettings};
use url_alias::config::Config;
use url_alias::domain::error::StorageError;
use url_alias::domain::repositories::UrlRepository;
use url_alias::infrastructure::cache::NullCache;
use url_alias::infrastructure::persistence::PgUrlRepository;
use url_alias::server::connect_pool;
use url_alias::utils::alias_generator::RandomAliasGenerator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new alias → URL mapping
    Save {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Alias to use (generated when omitted)
        #[arg(short, long)]
        alias: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the target URL of an alias
    Resolve {
        alias: String,
    },

    /// List the most recent mappings
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Show statistics
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
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Create the `url` table and index if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Save { url, alias, yes } => {
            save_url(repo, ServiceSettings::from_config(&config), url, alias, yes).await?
        }
        Commands::Resolve { alias } => resolve_alias(repo, &alias).await?,
        Commands::List { limit } => list_mappings(repo, limit).await?,
        Commands::Stats => handle_stats(repo).await?,
        Commands::Db { action } => handle_db_action(action, &pool, repo).await?,
    }

    pool.close().await;
    Ok(())
}

/// Saves a mapping through the same validation and collision rules as the API.
async fn save_url(
    repo: Arc<PgUrlRepository>,
    settings: ServiceSettings,
    url: Option<String>,
    alias: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Save URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    println!("  URL:   {}", url.cyan());
    println!(
        "  Alias: {}",
        alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("(generated)")
            .cyan()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Save this mapping?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = SaveService::new(
        repo,
        Arc::new(NullCache::new()),
        Arc::new(RandomAliasGenerator),
        settings,
    );

    let saved = service.save(&url, alias).await?;

    println!();
    println!("{}", "✅ Saved".green().bold());
    println!("  ID:    {}", saved.id.to_string().bright_black());
    println!("  Alias: {}", saved.alias.bright_yellow().bold());
    println!();

    Ok(())
}

async fn resolve_alias(repo: Arc<PgUrlRepository>, alias: &str) -> Result<()> {
    match repo.get_by_alias(alias).await {
        Ok(url) => {
            println!("  {} → {}", alias.cyan(), url.bright_white());
        }
        Err(StorageError::NotFound(_)) => {
            println!("{}", format!("  Alias '{}' not found", alias).yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    }

    Ok(())
}

/// Lists the newest mappings.
///
/// # Output Format
///
/// ```text
/// 📋 Recent Mappings
///
///   ID    Alias            Created            URL
///   ─────────────────────────────────────────────────────────────────────
///   2     docs             2026-01-15 10:30   https://docs.example.com
///   1     Xy12Ab           2026-01-15 10:29   https://example.com
/// ```
async fn list_mappings(repo: Arc<PgUrlRepository>, limit: i64) -> Result<()> {
    println!("{}", "📋 Recent Mappings".bright_blue().bold());
    println!();

    let mappings = repo
        .list_recent(limit.max(1))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list mappings: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        println!();
        println!(
            "  Create one with: {} admin save <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<16} {:<18} {}",
        "ID".bright_white().bold(),
        "Alias".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<5} {:<16} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.alias.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.target_url
        );
    }

    println!();
    println!(
        "  Shown: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_stats(repo: Arc<PgUrlRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!(
        "  Mappings: {}",
        total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    pool: &PgPool,
    repo: Arc<PgUrlRepository>,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Init => {
            println!("{}", "🛠  Preparing schema...".bright_blue());

            repo.ensure_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to prepare schema: {}", e))?;

            println!("{}", "✅ Table `url` ready".green().bold());
        }
    }

    Ok(())
}

//! CLI administration tool for riid.
//!
//! Reads the same environment as the server and talks to the click database
//! directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Click history for a code
//! cargo run --bin admin -- stats promo
//!
//! # Check the click database
//! cargo run --bin admin -- db check
//!
//! # Check an authorization code against VALID_AUTH_CODES
//! cargo run --bin admin -- auth check "$CODE"
//! ```
//!
//! # Environment Variables
//!
//! - `CLICK_DB_URL` / `SQLITE_DB_PATH`: click database location
//! - `VALID_AUTH_CODES`: allow-list used by `auth check`

use riid::application::services::{AuthValidator, StatsService};
use riid::config::{self, Config};
use riid::domain::repositories::ClickLog;
use riid::infrastructure::persistence::SqliteClickLog;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing riid.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show click history for a short code
    Stats {
        /// Short code or custom handle
        code: String,

        /// Show at most this many clicks
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Authorization code operations
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check click database connection
    Check,
}

/// Authorization code subcommands.
#[derive(Subcommand)]
enum AuthAction {
    /// Check whether a code is on the allow-list
    Check {
        /// Code to check
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Stats { code, limit } => handle_stats(&config, &code, limit).await?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
        Commands::Auth { action } => handle_auth_action(&config, action),
    }

    Ok(())
}

async fn open_click_log(config: &Config) -> Result<SqliteClickLog> {
    SqliteClickLog::connect(
        &config.click_db_url,
        config.db_max_connections,
        config.store_timeout(),
    )
    .await
    .context("Failed to open click database")
}

/// Prints the most recent clicks for `code`.
async fn handle_stats(config: &Config, code: &str, limit: usize) -> Result<()> {
    println!("{}", "📊 Click Statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(Arc::new(open_click_log(config).await?));
    let stats = service
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("  Code:   {}", stats.short_code.cyan());
    println!(
        "  Clicks: {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!();

    if stats.clicks.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        println!();
        return Ok(());
    }

    for click in stats.clicks.iter().take(limit) {
        println!(
            "  {:<20} {:<40} {}",
            click
                .timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            click.user_agent.as_deref().unwrap_or("-"),
            click.referrer.as_deref().unwrap_or("-").bright_black()
        );
    }

    if stats.total_clicks > limit {
        println!();
        println!(
            "  {}",
            format!("... {} more", stats.total_clicks - limit).bright_black()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking click database...".bright_blue());

            let click_log = open_click_log(config).await?;
            if !click_log.health_check().await {
                anyhow::bail!("Click database is not responding");
            }

            println!("{}", "✅ Click database OK".green().bold());
        }
    }

    Ok(())
}

/// Handles authorization code commands. The code is never echoed back.
fn handle_auth_action(config: &Config, action: AuthAction) {
    match action {
        AuthAction::Check { code } => {
            let validator = AuthValidator::new(config.auth_codes.iter().cloned());

            if !validator.is_enabled() {
                println!("{}", "⚠️  VALID_AUTH_CODES is empty".yellow());
            }

            if validator.validate(&code) {
                println!("{}", "✅ Code is valid".green().bold());
            } else {
                println!("{}", "❌ Code is not on the allow-list".red().bold());
            }
        }
    }
}

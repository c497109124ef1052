//! CLI administration tool for snaplink.
//!
//! Creates and inspects short links directly against the configured
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- create https://example.com/very/long/path
//!
//! # Show click statistics for a code
//! cargo run --bin admin -- stats 21
//!
//! # Convert between ids and short codes
//! cargo run --bin admin -- encode 125
//! cargo run --bin admin -- decode 21
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`snaplink::config`].

use snaplink::config::{self, Config, mask_connection_string};
use snaplink::infrastructure::persistence::open_repository;
use snaplink::prelude::*;
use snaplink::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;

/// CLI tool for managing snaplink.
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
    /// Create a short link
    Create {
        /// URL to shorten
        url: Option<String>,

        /// Base URL used to print the short link
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show statistics for a short code
    Stats {
        /// Short code to inspect
        code: String,
    },

    /// Print the short code for a link id
    Encode {
        /// Link id
        id: u64,
    },

    /// Print the link id a short code stands for
    Decode {
        /// Short code
        code: String,
    },

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => {
            print_encode(id);
            Ok(())
        }
        Commands::Decode { code } => print_decode(&code),
        Commands::Create { url, base_url } => {
            let (service, config) = connect().await?;
            let result = create_link(&service, url, base_url.or(config.base_url)).await;
            service.shutdown().await;
            result
        }
        Commands::Stats { code } => {
            let (service, _) = connect().await?;
            let result = show_stats(&service, &code).await;
            service.shutdown().await;
            result
        }
        Commands::Db {
            action: DbAction::Check,
        } => {
            let (service, config) = connect().await?;
            let result = check_db(&service, &config.database_url).await;
            service.shutdown().await;
            result
        }
    }
}

/// Loads configuration and opens the configured repository.
async fn connect() -> Result<(LinkService<dyn LinkRepository>, Config)> {
    let config = config::load_from_env()?;
    let repository = open_repository(&config)
        .await
        .context("Failed to open database")?;

    Ok((LinkService::new(repository), config))
}

/// Creates a short link, prompting for the URL if it was not given.
async fn create_link(
    service: &LinkService<dyn LinkRepository>,
    url: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .interact_text()?,
    };

    let link = service
        .create_short_link(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  Code:     {}", link.short_code.bright_yellow().bold());
    println!("  Original: {}", link.original_url.cyan());
    if let Some(base) = base_url {
        println!(
            "  Short:    {}",
            service.get_short_url(&base, &link.short_code).bright_cyan()
        );
    }
    println!();

    Ok(())
}

/// Displays click statistics for a code.
async fn show_stats(service: &LinkService<dyn LinkRepository>, code: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let link = match service.get_stats(code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("  {} {}", "No link with code".yellow(), code.bright_white());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Code:     {}", link.short_code.bright_yellow().bold());
    println!("  Original: {}", link.original_url.cyan());
    println!(
        "  Clicks:   {}",
        link.clicks.to_string().bright_white().bold()
    );
    println!(
        "  Created:  {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

fn print_encode(id: u64) {
    println!(
        "{} → {}",
        id.to_string().bright_white(),
        base62::encode(id).bright_yellow().bold()
    );
}

fn print_decode(code: &str) -> Result<()> {
    let id = base62::decode(code).with_context(|| format!("'{}' is not a base62 code", code))?;
    println!(
        "{} → {}",
        code.bright_yellow(),
        id.to_string().bright_white().bold()
    );
    Ok(())
}

/// Verifies the database answers queries.
async fn check_db(service: &LinkService<dyn LinkRepository>, database_url: &str) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    service
        .health_check()
        .await
        .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!("  {}", mask_connection_string(database_url).bright_black());

    Ok(())
}

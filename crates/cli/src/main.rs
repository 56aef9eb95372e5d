//! Product Icon CLI - database migrations and direct settings access.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! picon migrate
//!
//! # Inspect or change one shop's settings
//! picon settings get my-shop
//! picon settings set my-shop --icon-url https://cdn.example.com/badge.png -p bottom-left
//! picon settings list
//! ```
//!
//! The database defaults to the server's `DATABASE_PATH` resolution and can be
//! overridden with `--database`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "picon")]
#[command(author, version, about = "Product icon CLI tools")]
struct Cli {
    /// `SQLite` database file (defaults to the server configuration)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Read or write shop settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the settings for a shop
    Get {
        /// Shop identifier (e.g. `my-shop`)
        shop: String,
    },
    /// Insert or replace the settings for a shop
    Set {
        /// Shop identifier (e.g. `my-shop`)
        shop: String,

        /// Absolute icon image URL (empty for no icon)
        #[arg(short, long, default_value = "")]
        icon_url: String,

        /// Icon position (`top-left`, `top-right`, `bottom-left`, `bottom-right`)
        #[arg(short, long, default_value = "top-right")]
        position: String,
    },
    /// List all stored settings
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr, so JSON output on stdout stays clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let path = commands::database_path(cli.database.as_deref())?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&path).await?,
        Commands::Settings { action } => {
            let pool = commands::open_store(&path).await?;
            let mut out = std::io::stdout().lock();
            let result = match action {
                SettingsAction::Get { shop } => {
                    commands::settings::get(&pool, &shop, &mut out).await
                }
                SettingsAction::Set {
                    shop,
                    icon_url,
                    position,
                } => {
                    commands::settings::set(&pool, &shop, &icon_url, &position, &mut out).await
                }
                SettingsAction::List => commands::settings::list(&pool, &mut out).await,
            };
            pool.close().await;
            result?;
        }
    }
    Ok(())
}

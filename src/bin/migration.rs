//! Migration runner.
//!
//! Run with: cargo run --bin migration -- <up|down|fresh|status>

use clap::{Parser, Subcommand};
use migrations::Migrator;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration", about = "Run pharmacy-api database migrations")]
struct Cli {
    /// Database URL; defaults to the DATABASE_URL environment variable
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migration
    Down,
    /// Drop everything and re-apply all migrations
    Fresh,
    /// Show applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite://pharmacy.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(2)
        .connect_timeout(Duration::from_secs(10));
    let db = Database::connect(options).await?;

    match cli.command {
        Command::Up => {
            info!("applying pending migrations");
            Migrator::up(&db, None).await?;
        }
        Command::Down => {
            info!("rolling back last migration");
            Migrator::down(&db, Some(1)).await?;
        }
        Command::Fresh => {
            info!("recreating schema from scratch");
            Migrator::fresh(&db).await?;
        }
        Command::Status => {
            Migrator::status(&db).await?;
        }
    }

    info!("done");
    Ok(())
}

//! Bootstrap seeder.
//!
//! Creates the first SUPER admin so the dashboard can be reached at all;
//! `/auth/register/admin` itself requires an authenticated SUPER admin.
//!
//! Run with: cargo run --bin seed-data -- --email root@pharmacy.example --password <pw>

use chrono::Utc;
use clap::Parser;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectOptions, Database, EntityTrait, PaginatorTrait, QueryFilter, Set};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use pharmacy_api::auth;
use pharmacy_api::entities::admin;

#[derive(Parser)]
#[command(name = "seed-data", about = "Create the bootstrap SUPER admin")]
struct Cli {
    /// Database URL; defaults to the DATABASE_URL environment variable
    #[arg(long)]
    database_url: Option<String>,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    #[arg(long, default_value = "+10000000000")]
    phone: String,

    #[arg(long, default_value = "Super")]
    first_name: String,

    #[arg(long, default_value = "Admin")]
    last_name: String,
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

    let existing = admin::Entity::find()
        .filter(admin::Column::Email.eq(cli.email.to_lowercase()))
        .count(&db)
        .await?;
    if existing > 0 {
        info!(email = %cli.email, "admin already exists, nothing to do");
        return Ok(());
    }

    anyhow::ensure!(
        cli.password.len() >= 8,
        "password must be at least 8 characters long"
    );

    let now = Utc::now();
    let created = admin::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(cli.email.to_lowercase()),
        phone: Set(cli.phone),
        password_hash: Set(auth::hash_password(&cli.password)?),
        first_name: Set(cli.first_name),
        last_name: Set(cli.last_name),
        admin_level: Set(auth::AdminLevel::Super.to_string()),
        is_active: Set(true),
        last_login_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;

    info!(admin_id = %created.id, email = %created.email, "bootstrap SUPER admin created");
    Ok(())
}

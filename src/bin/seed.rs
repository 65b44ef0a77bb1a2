//! Populate an empty GearGuard database with demo teams, equipment and
//! maintenance requests.

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearguard_server::{
    config::AppConfig,
    repository::Repository,
    services::{seed::seed_demo_data, Services},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_filter().into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let services = Services::new(Arc::new(Repository::new(pool)));

    seed_demo_data(&services, Local::now().date_naive()).await?;

    Ok(())
}

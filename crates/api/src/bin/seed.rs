//! Load the starter creatures into the configured database.
//!
//! Existing names are left alone, so running it twice is harmless.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bestiary_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bestiary_db=info,bestiary_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let pool = bestiary_db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;

    bestiary_db::ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    let inserted = bestiary_db::seed::run(&pool)
        .await
        .context("Failed to seed the bestiary")?;
    tracing::info!(inserted, "Seeding complete");

    pool.close().await;
    Ok(())
}

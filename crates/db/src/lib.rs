//! Persistence for the bestiary: pool setup, schema bootstrap, row models
//! and the creature repository.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::SqlitePool;

/// Schema for the single `creatures` table. Idempotent; there is no
/// migration history.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS creatures ( \
         id            INTEGER PRIMARY KEY AUTOINCREMENT, \
         name          TEXT    NOT NULL, \
         name_folded   TEXT    NOT NULL, \
         description   TEXT    NOT NULL, \
         danger_level  INTEGER NOT NULL, \
         habitat       TEXT    NOT NULL, \
         quote         TEXT, \
         category      TEXT    NOT NULL, \
         abilities     TEXT, \
         related_works TEXT, \
         image_url     TEXT, \
         status        TEXT    NOT NULL, \
         min_insanity  INTEGER NOT NULL DEFAULT 0, \
         relations     TEXT, \
         audio_url     TEXT, \
         video_url     TEXT, \
         CONSTRAINT uq_creatures_name UNIQUE (name) \
     )",
    "CREATE INDEX IF NOT EXISTS idx_creatures_category ON creatures (category)",
    "CREATE INDEX IF NOT EXISTS idx_creatures_name_folded ON creatures (name_folded)",
];

/// Create a connection pool from a database URL.
///
/// The database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `creatures` table and its indexes if they are missing.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::debug!("Creature schema ensured");
    Ok(())
}

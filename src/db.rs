use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool against `database_url` and bring the schema up to date.
///
/// The database file is created if it does not exist yet.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("parse database url")?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("connect to database")?;
    MIGRATOR.run(&pool).await.context("run migrations")?;
    Ok(pool)
}

/// Throwaway in-memory database with the schema applied.
///
/// Capped at a single connection: every pooled `:memory:` connection is its
/// own database, so a wider pool would lose the tables between calls.
pub async fn in_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("open in-memory database")?;
    MIGRATOR.run(&pool).await.context("run migrations")?;
    Ok(pool)
}

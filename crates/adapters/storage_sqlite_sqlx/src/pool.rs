//! `SQLite` pool setup. Opening a [`Database`] also applies the embedded
//! migrations, so a freshly opened pool always has the `users` table.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Connection settings for the `SQLite` adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:hello.db` or `sqlite::memory:`).
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Config {
    /// In-memory database, mostly useful for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Open the pool, creating the database file if missing, then migrate.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the connection fails,
    /// or a migration cannot be applied.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn open(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database ready");

        Ok(Database { pool })
    }
}

/// An open, migrated connection pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_users_table_when_opening_memory_db() {
        let db = Config::in_memory().open().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        assert_eq!(names, vec!["users"]);
    }

    #[tokio::test]
    async fn should_honour_max_connections() {
        let config = Config {
            max_connections: 3,
            ..Config::in_memory()
        };
        let db = config.open().await.unwrap();
        assert_eq!(db.pool().options().get_max_connections(), 3);
    }

    #[tokio::test]
    async fn should_mark_pool_closed_after_close() {
        let db = Config::in_memory().open().await.unwrap();
        db.close().await;
        assert!(db.pool().is_closed());
    }
}

//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hello_app::ports::UserRepository;
use hello_domain::error::HelloError;
use hello_domain::id::UserId;
use hello_domain::user::User;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: Option<String> = row.try_get("email")?;

        Ok(Self(User {
            id: Some(UserId::new(id)),
            name,
            email,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (name, email) VALUES (?, ?) RETURNING id";
const UPSERT: &str = "INSERT INTO users (id, name, email) VALUES (?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, email = excluded.email";
const SELECT_BY_ID: &str = "SELECT id, name, email FROM users WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, email FROM users ORDER BY id";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<User>, HelloError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, HelloError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn save(&self, user: User) -> impl Future<Output = Result<User, HelloError>> + Send {
        let pool = self.pool.clone();
        async move {
            let Some(id) = user.id else {
                let (id,): (i64,) = sqlx::query_as(INSERT)
                    .bind(&user.name)
                    .bind(&user.email)
                    .fetch_one(&pool)
                    .await
                    .map_err(StorageError::from)?;

                tracing::debug!(user_id = id, "inserted user");
                return Ok(user.with_id(UserId::new(id)));
            };

            sqlx::query(UPSERT)
                .bind(id.get())
                .bind(&user.name)
                .bind(&user.email)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(user_id = %id, "upserted user");
            Ok(user)
        }
    }
}

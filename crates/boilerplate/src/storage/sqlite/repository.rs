//! SQLite repository implementation.
//!
//! Implements the [`UserStore`] contract from `boilerplate_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use tokio_util::sync::CancellationToken;

use boilerplate_core::storage::{Operation, Result, UserStore};
use boilerplate_core::user::User;

use super::conversions::{format_datetime, row_to_user};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns "zero rows affected" into `QueryReturnedNoRows`, which maps to `NotFound`.
fn require_affected(rows: usize) -> tokio_rusqlite::Result<()> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

fn interrupted() -> tokio_rusqlite::Error {
    wrap_err(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_INTERRUPT),
        None,
    ))
}

/// SQLite-based store implementation.
///
/// The connection runs on a dedicated background thread owned by
/// `tokio-rusqlite`; the handle is cheap to share across concurrent calls.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store backed by a database file.
    ///
    /// The file is created if it doesn't exist, and `":memory:"` opens a
    /// private in-memory database. The schema is created automatically.
    pub async fn new(path: &str) -> tokio_rusqlite::Result<Self> {
        let conn = Connection::open(path).await?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path, "opened sqlite user store");
        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the store is dropped.
    pub async fn new_in_memory() -> tokio_rusqlite::Result<Self> {
        let conn = Connection::open_in_memory().await?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> tokio_rusqlite::Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
    }

    /// Runs `function` on the connection thread.
    ///
    /// If the returned future is dropped before the closure starts, e.g.
    /// because the caller's request was cancelled while the connection was
    /// busy, the closure is skipped instead of running unobserved. A closure
    /// that has already started runs to completion.
    async fn call<F, R>(&self, function: F) -> tokio_rusqlite::Result<R>
    where
        F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let abandoned = CancellationToken::new();
        let guard = abandoned.clone().drop_guard();

        let result = self
            .conn
            .call(move |conn| {
                if abandoned.is_cancelled() {
                    tracing::debug!("skipping sqlite call abandoned by its caller");
                    return Err(interrupted());
                }
                function(conn)
            })
            .await;

        guard.disarm();
        result
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.clone();
        let name = user.name.clone();
        let email = user.email.clone();
        let created_at = format_datetime(&user.created_at);
        let updated_at = format_datetime(&user.updated_at);

        self.call(move |conn| {
            conn.execute(
                schema::INSERT_USER,
                rusqlite::params![id, name, email, created_at, updated_at],
            )
            .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, Operation::Create, Some(&user.id)))
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let id_str = id.to_string();

        self.call(move |conn| {
            let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
            stmt.query_row([&id_str], row_to_user).map_err(wrap_err)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, Operation::Get, Some(id)))
    }

    /// Writes and reads back in one transaction. A stored row that no longer
    /// decodes rolls the write back.
    async fn update_user(&self, user: &User) -> Result<User> {
        let id = user.id.clone();
        let name = user.name.clone();
        let email = user.email.clone();
        let updated_at = format_datetime(&user.updated_at);

        self.call(move |conn| {
            let tx = conn.transaction().map_err(wrap_err)?;
            let stored = tx
                .query_row(
                    schema::UPDATE_USER,
                    rusqlite::params![id, name, email, updated_at],
                    row_to_user,
                )
                .map_err(wrap_err)?;
            tx.commit().map_err(wrap_err)?;
            Ok(stored)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, Operation::Update, Some(&user.id)))
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let id_str = id.to_string();

        self.call(move |conn| {
            let rows = conn.execute(schema::DELETE_USER, [&id_str]).map_err(wrap_err)?;
            require_affected(rows)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, Operation::Delete, Some(id)))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.call(|conn| {
            let mut stmt = conn.prepare(schema::SELECT_USERS).map_err(wrap_err)?;
            let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

            let mut users = Vec::new();
            for row_result in rows {
                users.push(row_result.map_err(wrap_err)?);
            }
            Ok(users)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, Operation::List, None))
    }
}

//! Database Module
//!
//! SQLite connection pool, migrations and the store implementations built
//! on it: the document store (`users`, `dining_tables`) and the identity
//! store (`identities`).

pub mod identity;
pub mod staff;
pub mod store;
pub mod tables;

pub use identity::SqliteIdentityStore;
pub use store::SqliteDocumentStore;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use thiserror::Error;

/// Store-layer error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl StoreError {
    /// Whether a boxed collaborator error is a store "not found"
    pub fn is_not_found(err: &(dyn std::error::Error + 'static)) -> bool {
        matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound(_)))
    }

    /// Whether a boxed collaborator error is a store conflict
    pub fn is_conflict(err: &(dyn std::error::Error + 'static)) -> bool {
        matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Conflict(_)))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Database service, owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database with WAL mode and apply migrations
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database on a single connection (tests and tooling)
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

//! Persistent storage for teams and players.
//!
//! [`Database`] owns the SQLite pool and applies the embedded migrations when
//! it is opened. Handlers never see the pool directly; they go through the
//! [`TeamsRepository`] and [`PlayersRepository`] traits so the route layer can
//! be exercised against an in-memory store.

#[cfg(test)]
pub mod memory;
mod players;
mod teams;

pub use players::SqlitePlayersRepository;
pub use teams::SqliteTeamsRepository;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::models::{Player, PlayerInput, Team, TeamInput};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("row not found")]
    NotFound,
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait TeamsRepository: Send + Sync {
    async fn list_teams(&self) -> Result<Vec<Team>, DbError>;

    /// Fails with [`DbError::NotFound`] when no team has this id.
    async fn get_team(&self, id: i64) -> Result<Team, DbError>;

    async fn create_team(&self, input: &TeamInput) -> Result<Team, DbError>;

    /// Deleting an id that does not exist is not an error.
    async fn delete_team(&self, id: i64) -> Result<(), DbError>;

    /// Overwrites name and description and returns the stored row.
    async fn update_team(&self, id: i64, input: &TeamInput) -> Result<Team, DbError>;
}

#[async_trait]
pub trait PlayersRepository: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, DbError>;

    /// Empty when the team has no players or does not exist.
    async fn list_players_by_team(&self, team_id: i64) -> Result<Vec<Player>, DbError>;

    async fn get_player(&self, id: i64) -> Result<Player, DbError>;

    async fn create_player(&self, input: &PlayerInput) -> Result<Player, DbError>;

    async fn delete_player(&self, id: i64) -> Result<(), DbError>;

    /// Overwrites name, jersey number and team and returns the stored row.
    async fn update_player(&self, id: i64, input: &PlayerInput) -> Result<Player, DbError>;
}

/// Database handle with connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Open the database at `url`, creating the file if needed, and apply
    /// pending migrations.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Self::ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        info!(url = %url, "Database connected");

        Self::from_pool(pool).await
    }

    /// Fresh private in-memory database. A single connection that is never
    /// recycled, since every SQLite memory connection is its own database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, DbError> {
        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("Database migrations checked/applied");

        Ok(Self { pool })
    }

    /// Get teams repository.
    pub fn teams(&self) -> SqliteTeamsRepository {
        SqliteTeamsRepository::new(self.pool.clone())
    }

    /// Get players repository.
    pub fn players(&self) -> SqlitePlayersRepository {
        SqlitePlayersRepository::new(self.pool.clone())
    }

    /// Wait for checked-out connections to be returned, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

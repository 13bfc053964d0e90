use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{Sqlite, SqlitePool};

use super::{DbError, PlayersRepository};
use crate::models::{Player, PlayerInput};

/// Players stored in the `players` table.
#[derive(Clone)]
pub struct SqlitePlayersRepository {
    pool: SqlitePool,
}

impl SqlitePlayersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn fetch_player<'e, E>(executor: E, id: i64) -> Result<Player, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Player>(
        r#"SELECT id, team_id, name, jersey_number, created_at, updated_at
           FROM players
           WHERE id = ?"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(DbError::NotFound)
}

#[async_trait]
impl PlayersRepository for SqlitePlayersRepository {
    async fn list_players(&self) -> Result<Vec<Player>, DbError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT id, team_id, name, jersey_number, created_at, updated_at
               FROM players
               ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn list_players_by_team(&self, team_id: i64) -> Result<Vec<Player>, DbError> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT id, team_id, name, jersey_number, created_at, updated_at
               FROM players
               WHERE team_id = ?
               ORDER BY id"#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn get_player(&self, id: i64) -> Result<Player, DbError> {
        fetch_player(&self.pool, id).await
    }

    async fn create_player(&self, input: &PlayerInput) -> Result<Player, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"INSERT INTO players (team_id, name, jersey_number, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(input.team_id)
        .bind(&input.name)
        .bind(&input.jersey_number)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let player = fetch_player(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(player)
    }

    async fn delete_player(&self, id: i64) -> Result<(), DbError> {
        sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_player(&self, id: i64, input: &PlayerInput) -> Result<Player, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"UPDATE players
               SET team_id = ?, name = ?, jersey_number = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(input.team_id)
        .bind(&input.name)
        .bind(&input.jersey_number)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let player = fetch_player(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(player)
    }
}

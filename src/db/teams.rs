use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{Sqlite, SqlitePool};

use super::{DbError, TeamsRepository};
use crate::models::{Team, TeamInput};

/// Teams stored in the `teams` table.
#[derive(Clone)]
pub struct SqliteTeamsRepository {
    pool: SqlitePool,
}

impl SqliteTeamsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn fetch_team<'e, E>(executor: E, id: i64) -> Result<Team, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Team>(
        r#"SELECT id, name, description, created_at, updated_at
           FROM teams
           WHERE id = ?"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(DbError::NotFound)
}

#[async_trait]
impl TeamsRepository for SqliteTeamsRepository {
    async fn list_teams(&self) -> Result<Vec<Team>, DbError> {
        let teams = sqlx::query_as::<_, Team>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM teams
               ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn get_team(&self, id: i64) -> Result<Team, DbError> {
        fetch_team(&self.pool, id).await
    }

    async fn create_team(&self, input: &TeamInput) -> Result<Team, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"INSERT INTO teams (name, description, created_at, updated_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let team = fetch_team(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(team)
    }

    async fn delete_team(&self, id: i64) -> Result<(), DbError> {
        sqlx::query(r#"DELETE FROM teams WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_team(&self, id: i64, input: &TeamInput) -> Result<Team, DbError> {
        let mut tx = self.pool.begin().await?;

        // Zero affected rows is not an error here; the re-fetch reports it.
        sqlx::query(
            r#"UPDATE teams
               SET name = ?, description = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let team = fetch_team(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(team)
    }
}

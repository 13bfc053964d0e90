//! In-memory repositories for route tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{DbError, PlayersRepository, TeamsRepository};
use crate::models::{Player, PlayerInput, Team, TeamInput};

#[derive(Default)]
struct Tables {
    next_id: i64,
    teams: BTreeMap<i64, Team>,
    players: BTreeMap<i64, Player>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Both repositories over one pair of maps, so player writes can check
/// team ids the way the foreign key does.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }

    pub fn team_count(&self) -> usize {
        self.with(|t| t.teams.len())
    }
}

fn foreign_key_violation() -> DbError {
    DbError::Sqlx(sqlx::Error::Protocol(
        "FOREIGN KEY constraint failed".to_string(),
    ))
}

#[async_trait]
impl TeamsRepository for MemoryStore {
    async fn list_teams(&self) -> Result<Vec<Team>, DbError> {
        Ok(self.with(|t| t.teams.values().cloned().collect()))
    }

    async fn get_team(&self, id: i64) -> Result<Team, DbError> {
        self.with(|t| t.teams.get(&id).cloned()).ok_or(DbError::NotFound)
    }

    async fn create_team(&self, input: &TeamInput) -> Result<Team, DbError> {
        Ok(self.with(|t| {
            let now = Utc::now();
            let team = Team {
                id: t.next_id(),
                name: input.name.clone(),
                description: input.description.clone(),
                created_at: now,
                updated_at: now,
            };
            t.teams.insert(team.id, team.clone());
            team
        }))
    }

    async fn delete_team(&self, id: i64) -> Result<(), DbError> {
        self.with(|t| {
            t.teams.remove(&id);
            t.players.retain(|_, p| p.team_id != id);
        });
        Ok(())
    }

    async fn update_team(&self, id: i64, input: &TeamInput) -> Result<Team, DbError> {
        self.with(|t| {
            let team = t.teams.get_mut(&id).ok_or(DbError::NotFound)?;
            team.name = input.name.clone();
            team.description = input.description.clone();
            team.updated_at = Utc::now();
            Ok(team.clone())
        })
    }
}

#[async_trait]
impl PlayersRepository for MemoryStore {
    async fn list_players(&self) -> Result<Vec<Player>, DbError> {
        Ok(self.with(|t| t.players.values().cloned().collect()))
    }

    async fn list_players_by_team(&self, team_id: i64) -> Result<Vec<Player>, DbError> {
        Ok(self.with(|t| {
            t.players
                .values()
                .filter(|p| p.team_id == team_id)
                .cloned()
                .collect()
        }))
    }

    async fn get_player(&self, id: i64) -> Result<Player, DbError> {
        self.with(|t| t.players.get(&id).cloned()).ok_or(DbError::NotFound)
    }

    async fn create_player(&self, input: &PlayerInput) -> Result<Player, DbError> {
        self.with(|t| {
            if !t.teams.contains_key(&input.team_id) {
                return Err(foreign_key_violation());
            }
            let now = Utc::now();
            let player = Player {
                id: t.next_id(),
                team_id: input.team_id,
                name: input.name.clone(),
                jersey_number: input.jersey_number.clone(),
                created_at: now,
                updated_at: now,
            };
            t.players.insert(player.id, player.clone());
            Ok(player)
        })
    }

    async fn delete_player(&self, id: i64) -> Result<(), DbError> {
        self.with(|t| t.players.remove(&id));
        Ok(())
    }

    async fn update_player(&self, id: i64, input: &PlayerInput) -> Result<Player, DbError> {
        self.with(|t| {
            let Tables { teams, players, .. } = t;
            let player = players.get_mut(&id).ok_or(DbError::NotFound)?;
            if !teams.contains_key(&input.team_id) {
                return Err(foreign_key_violation());
            }
            player.team_id = input.team_id;
            player.name = input.name.clone();
            player.jersey_number = input.jersey_number.clone();
            player.updated_at = Utc::now();
            Ok(player.clone())
        })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Team row from the teams table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Player row from the players table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub jersey_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a team.
///
/// Server-assigned fields (`id`, timestamps) are ignored when a client sends
/// a full team back. Absent fields deserialize as empty so they are reported
/// by [`TeamInput::validate`] rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for creating or updating a player
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerInput {
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub jersey_number: String,
}

/// One or more required fields were missing or blank.
#[derive(Debug, Error, PartialEq)]
#[error("{}", .0.join("; "))]
pub struct ValidationError(pub Vec<String>);

fn require_text(field: &str, value: &str, problems: &mut Vec<String>) {
    if value.trim().is_empty() {
        problems.push(format!("{field} is required"));
    }
}

fn finish(problems: Vec<String>) -> Result<(), ValidationError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(problems))
    }
}

impl TeamInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();
        require_text("name", &self.name, &mut problems);
        require_text("description", &self.description, &mut problems);
        finish(problems)
    }
}

impl PlayerInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();
        if self.team_id <= 0 {
            problems.push("team_id is required".to_string());
        }
        require_text("name", &self.name, &mut problems);
        require_text("jersey_number", &self.jersey_number, &mut problems);
        finish(problems)
    }
}

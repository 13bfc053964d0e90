use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    Router,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use super::{AppState, app};
use crate::auth::AdminCredentials;
use crate::db::memory::MemoryStore;
use crate::db::{Database, PlayersRepository, TeamsRepository};
use crate::models::{Player, PlayerInput, Team, TeamInput};

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{username}:{password}")))
}

pub fn admin_auth() -> String {
    basic_auth("admin", "secret")
}

/// The full service over either the in-memory store or a fresh SQLite
/// database, plus direct repository handles for seeding.
pub struct TestApp {
    service: NormalizePath<Router>,
    teams: Arc<dyn TeamsRepository>,
    players: Arc<dyn PlayersRepository>,
    store: Option<Arc<MemoryStore>>,
}

impl TestApp {
    pub fn with_repositories(
        teams: Arc<dyn TeamsRepository>,
        players: Arc<dyn PlayersRepository>,
    ) -> Self {
        let state = AppState {
            teams: teams.clone(),
            players: players.clone(),
            admin: Arc::new(AdminCredentials::new("admin", "secret")),
        };
        Self {
            service: app(state, Duration::from_secs(5)),
            teams,
            players,
            store: None,
        }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        let mut app = Self::with_repositories(store.clone(), store.clone());
        app.store = Some(store);
        app
    }

    pub async fn sqlite() -> Self {
        let db = Database::in_memory().await.unwrap();
        Self::with_repositories(Arc::new(db.teams()), Arc::new(db.players()))
    }

    pub fn store(&self) -> &MemoryStore {
        self.store.as_deref().expect("not backed by the memory store")
    }

    pub async fn seed_team(&self, name: &str) -> Team {
        let input = TeamInput {
            name: name.to_string(),
            description: format!("{name} football club"),
        };
        self.teams.create_team(&input).await.unwrap()
    }

    pub async fn seed_player(&self, team_id: i64, name: &str, jersey_number: &str) -> Player {
        let input = PlayerInput {
            team_id,
            name: name.to_string(),
            jersey_number: jersey_number.to_string(),
        };
        self.players.create_player(&input).await.unwrap()
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.service.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        json: Option<Value>,
        authorization: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let body = match json {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.request(builder.body(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }
}

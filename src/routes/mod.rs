use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AdminCredentials};
use crate::db::{PlayersRepository, TeamsRepository};
use crate::error::ApiError;

pub mod extract;
pub mod health;
pub mod players;
pub mod teams;

#[cfg(test)]
mod testing;

/// Shared handler state: the two repositories and the admin credentials.
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamsRepository>,
    pub players: Arc<dyn PlayersRepository>,
    pub admin: Arc<AdminCredentials>,
}

/// Routes under `/api/v1`. Reads are public; writes sit behind Basic auth.
///
/// Every route under `/players/` names its first segment `{id}` so they can
/// coexist in the router. For the two player GETs that segment is a team id.
fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/teams", get(teams::list_teams))
        .route("/teams/{id}", get(teams::get_team))
        .route("/players", get(players::list_players))
        .route("/players/{id}", get(players::list_players_by_team))
        .route("/players/{id}/details/{player_id}", get(players::get_player));

    let admin = Router::new()
        .route("/teams", post(teams::create_team))
        .route("/teams/{id}", put(teams::update_team).delete(teams::delete_team))
        .route("/players", post(players::create_player))
        .route("/players/{id}", put(players::update_player).delete(players::delete_player))
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    public.merge(admin)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    ApiError::InternalError.into_response()
}

/// The full HTTP service: `/ping`, the API group with its access log, a
/// blanket request timeout, panic recovery, and trailing-slash trimming.
pub fn app(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/ping", get(health::ping))
        .nest(
            "/api/v1",
            api_routes(state.clone()).layer(TraceLayer::new_for_http()),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

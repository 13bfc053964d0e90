use std::sync::Arc;
use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
mod error;
mod models;
mod routes;

use crate::auth::AdminCredentials;
use crate::config::Config;
use crate::db::Database;
use crate::routes::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting soccer api server...");

    let config = Config::from_env().expect("Invalid configuration");

    // Open the database and apply pending migrations
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to open database");

    let state = AppState {
        teams: Arc::new(db.teams()),
        players: Arc::new(db.players()),
        admin: Arc::new(AdminCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        )),
    };

    let app = routes::app(state, config.request_timeout);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server.");

    db.close().await;
    tracing::info!("Server stopped.");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

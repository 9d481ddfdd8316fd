mod app_state;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod utils;

use app_state::AppState;
use config::AppConfig;
use database::init::init_db;
use repositories::{message_repository::MessageRepository, user_repository::UserRepository};
use routes::app_routes::create_router;
use services::jwt_service::JwtService;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Also picks up `log` records through the tracing-log bridge
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let db = match init_db(&config.database_url).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Error initializing the database: {}", e);
            return;
        }
    };

    let state = AppState::new(
        Arc::new(MessageRepository::new(db.clone())),
        Arc::new(UserRepository::new(db)),
        JwtService::new(config.jwt_secret.clone(), config.token_ttl_hours),
        config.bcrypt_cost,
    );
    let app = create_router(state);

    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}

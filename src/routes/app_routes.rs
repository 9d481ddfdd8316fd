// routes/app_routes.rs

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    app_state::AppState,
    handlers::{auth_handlers, message_handlers, user_handlers},
    middleware::auth_middleware::{authenticate_jwt, ensure_correct_user, ensure_logged_in},
};

/// Builds the full route table. Every request first passes `authenticate_jwt`;
/// user and message routes then require a logged-in caller.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/messages", message_routes())
        .layer(from_fn(authenticate_jwt))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

fn auth_routes() -> Router {
    Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
}

fn user_routes() -> Router {
    let per_user = Router::new()
        .route("/:username", get(user_handlers::get_user))
        .route("/:username/to", get(user_handlers::messages_to))
        .route("/:username/from", get(user_handlers::messages_from))
        .route_layer(from_fn(ensure_correct_user));

    Router::new()
        .route("/", get(user_handlers::list_users))
        .merge(per_user)
        .route_layer(from_fn(ensure_logged_in))
}

fn message_routes() -> Router {
    Router::new()
        .route("/", post(message_handlers::send_message))
        .route("/:id", get(message_handlers::get_message))
        .route("/:id/read", post(message_handlers::mark_read))
        .route_layer(from_fn(ensure_logged_in))
}

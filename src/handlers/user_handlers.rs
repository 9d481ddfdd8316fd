use axum::{debug_handler, Extension, Json};
use serde_json::{json, Value};

use crate::{
    app_state::AppState, error::AppResult, handlers::extractors::AppPath, services::user_service,
};

/// GET /users
#[debug_handler]
pub async fn list_users(Extension(state): Extension<AppState>) -> AppResult<Json<Value>> {
    let users = user_service::list_users(state.users.as_ref()).await?;
    Ok(Json(json!({ "users": users })))
}

/// GET /users/:username
#[debug_handler]
pub async fn get_user(
    Extension(state): Extension<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<Json<Value>> {
    let user = user_service::get_user(state.users.as_ref(), &username).await?;
    Ok(Json(json!({ "user": user })))
}

/// GET /users/:username/to
#[debug_handler]
pub async fn messages_to(
    Extension(state): Extension<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<Json<Value>> {
    // Inbox: everything addressed to this user
    let messages =
        user_service::messages_to(state.users.as_ref(), state.messages.as_ref(), &username).await?;
    Ok(Json(json!({ "messages": messages })))
}

/// GET /users/:username/from
#[debug_handler]
pub async fn messages_from(
    Extension(state): Extension<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<Json<Value>> {
    // Outbox: everything this user has sent
    let messages =
        user_service::messages_from(state.users.as_ref(), state.messages.as_ref(), &username).await?;
    Ok(Json(json!({ "messages": messages })))
}

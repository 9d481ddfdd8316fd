use axum::{debug_handler, http::StatusCode, Extension, Json};
use serde_json::{json, Value};
use tracing::debug;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::AppResult,
    handlers::extractors::{AppJson, AppPath},
    models::{message::SendMessageRequest, user::CurrentUser},
    services::message_service,
};

/// GET /messages/:id
#[debug_handler]
pub async fn get_message(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    debug!("User {} fetching message {}", username, id);

    // Only the sender or the recipient gets past the service
    let message = message_service::get_message(state.messages.as_ref(), &username, id).await?;
    Ok(Json(json!({ "message": message })))
}

/// POST /messages
#[debug_handler]
pub async fn send_message(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    AppJson(payload): AppJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    // Reject empty recipient or body before touching the store
    payload.validate()?;

    // The caller is always the sender
    let message = message_service::send_message(
        state.messages.as_ref(),
        &username,
        &payload.to_username,
        &payload.body,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

/// POST /messages/:id/read
#[debug_handler]
pub async fn mark_read(
    Extension(state): Extension<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Value>> {
    let receipt = message_service::mark_read(state.messages.as_ref(), &username, id).await?;
    Ok(Json(json!({ "message": receipt })))
}

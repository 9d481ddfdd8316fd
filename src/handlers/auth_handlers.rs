use axum::{debug_handler, extract::Extension, Json};
use serde_json::{json, Value};

use crate::{
    app_state::AppState,
    error::AppResult,
    handlers::extractors::AppJson,
    models::user::{LoginData, RegisterData},
    services::auth_service,
};

/// Handler for user registration
#[debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    AppJson(payload): AppJson<RegisterData>,
) -> AppResult<Json<Value>> {
    // Validation, hashing and the insert all happen in the service
    let token =
        auth_service::register_user(state.users.as_ref(), &state.jwt, state.bcrypt_cost, payload).await?;
    Ok(Json(json!({ "token": token })))
}

/// Handler for user login
#[debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    AppJson(payload): AppJson<LoginData>,
) -> AppResult<Json<Value>> {
    let token = auth_service::login_user(state.users.as_ref(), &state.jwt, payload).await?;
    Ok(Json(json!({ "token": token })))
}

// services/auth_service.rs

use bcrypt::{hash, verify};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginData, RegisterData},
    repositories::UserStore,
    services::jwt_service::JwtService,
};

/// Registers a user and hands back a token for the new account
pub async fn register_user(
    users: &dyn UserStore,
    jwt: &JwtService,
    bcrypt_cost: u32,
    payload: RegisterData,
) -> AppResult<String> {
    // Validate input data
    payload.validate()?;

    // Hash password and create user
    let hashed_password = hash(&payload.password, bcrypt_cost)?;
    let user = users.register(&payload, &hashed_password).await?;
    users.update_login_timestamp(&user.username).await?;

    info!("Registered user {}", user.username);
    jwt.create_jwt(&user.username)
}

/// Checks a username/password pair and hands back a token
pub async fn login_user(users: &dyn UserStore, jwt: &JwtService, payload: LoginData) -> AppResult<String> {
    let stored_password = match users.password_hash(&payload.username).await? {
        Some(hash) => hash,
        None => {
            warn!("Login attempt for unknown user {}", payload.username);
            return Err(AppError::InvalidCredentials);
        }
    };

    // A hash bcrypt cannot parse is a storage fault, not a bad password
    if !verify(&payload.password, &stored_password)? {
        warn!("Wrong password for user {}", payload.username);
        return Err(AppError::InvalidCredentials);
    }

    // Record the login, then issue the token
    users.update_login_timestamp(&payload.username).await?;
    jwt.create_jwt(&payload.username)
}

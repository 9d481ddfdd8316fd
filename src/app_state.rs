// app_state.rs

use std::sync::Arc;

use crate::{
    repositories::{MessageStore, UserStore},
    services::jwt_service::JwtService,
};

/// Application state shared by every request
#[derive(Clone)]
pub struct AppState {
    /// Message persistence
    pub messages: Arc<dyn MessageStore>,
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Token issuer and verifier
    pub jwt: JwtService,
    /// bcrypt work factor used at registration
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Creates a new instance of AppState
    ///
    /// # Arguments
    /// * `messages` - Message store implementation
    /// * `users` - User store implementation
    /// * `jwt` - Token service built from the configured secret
    /// * `bcrypt_cost` - Password hashing work factor
    pub fn new(
        messages: Arc<dyn MessageStore>,
        users: Arc<dyn UserStore>,
        jwt: JwtService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            messages,
            users,
            jwt,
            bcrypt_cost,
        }
    }
}

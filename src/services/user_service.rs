// services/user_service.rs

use crate::{
    error::AppResult,
    models::{
        message::MessageDetail,
        user::{UserDetail, UserSummary},
    },
    repositories::{MessageStore, UserStore},
};

pub async fn list_users(users: &dyn UserStore) -> AppResult<Vec<UserSummary>> {
    users.all().await
}

pub async fn get_user(users: &dyn UserStore, username: &str) -> AppResult<UserDetail> {
    users.get(username).await
}

/// Messages addressed to `username`. The user must exist.
pub async fn messages_to(
    users: &dyn UserStore,
    messages: &dyn MessageStore,
    username: &str,
) -> AppResult<Vec<MessageDetail>> {
    // Unknown users are a 404, not an empty inbox
    users.get(username).await?;
    messages.received_by(username).await
}

/// Messages written by `username`. The user must exist.
pub async fn messages_from(
    users: &dyn UserStore,
    messages: &dyn MessageStore,
    username: &str,
) -> AppResult<Vec<MessageDetail>> {
    users.get(username).await?;
    messages.sent_by(username).await
}

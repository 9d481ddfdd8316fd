pub mod message_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory_repository;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        message::{Message, MessageDetail, ReadReceipt},
        user::{RegisterData, UserDetail, UserSummary},
    },
};

/// Persistence for messages. Every call completes the write (or read) before returning.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fails with `NotFound` when no message has this id
    async fn get(&self, id: i32) -> AppResult<MessageDetail>;

    /// Fails with `NotFound` when the recipient does not exist
    async fn create(&self, from_username: &str, to_username: &str, body: &str) -> AppResult<Message>;

    /// Stamps `read_at` the first time; later calls return the first stamp
    async fn mark_read(&self, id: i32) -> AppResult<ReadReceipt>;

    async fn sent_by(&self, username: &str) -> AppResult<Vec<MessageDetail>>;

    async fn received_by(&self, username: &str) -> AppResult<Vec<MessageDetail>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken
    async fn register(&self, data: &RegisterData, hashed_password: &str) -> AppResult<UserSummary>;

    async fn password_hash(&self, username: &str) -> AppResult<Option<String>>;

    async fn update_login_timestamp(&self, username: &str) -> AppResult<()>;

    async fn get(&self, username: &str) -> AppResult<UserDetail>;

    async fn all(&self) -> AppResult<Vec<UserSummary>>;
}

// repositories/memory_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Mutex};

use super::{MessageStore, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        message::{Message, MessageDetail, ReadReceipt},
        user::{RegisterData, UserDetail, UserSummary},
    },
};

struct StoredUser {
    detail: UserDetail,
    password: String,
}

#[derive(Clone)]
struct StoredMessage {
    id: i32,
    from_username: String,
    to_username: String,
    body: String,
    sent_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

/// Both stores backed by process memory, for tests
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, StoredUser>>,
    messages: Mutex<Vec<StoredMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user with a plain marker instead of a real hash
    pub fn with_user(self, username: &str) -> Self {
        let detail = UserDetail {
            username: username.to_string(),
            first_name: format!("{}-first", username),
            last_name: format!("{}-last", username),
            phone: "+1 555-0100".to_string(),
            join_at: Utc::now(),
            last_login_at: None,
        };
        self.users.lock().unwrap().insert(
            username.to_string(),
            StoredUser {
                detail,
                password: String::new(),
            },
        );
        self
    }

    pub fn read_at(&self, id: i32) -> Option<DateTime<Utc>> {
        let messages = self.messages.lock().unwrap();
        messages.iter().find(|m| m.id == id).and_then(|m| m.read_at)
    }

    fn summary(&self, username: &str) -> UserSummary {
        let users = self.users.lock().unwrap();
        let detail = &users[username].detail;
        UserSummary {
            username: detail.username.clone(),
            first_name: detail.first_name.clone(),
            last_name: detail.last_name.clone(),
            phone: detail.phone.clone(),
        }
    }

    fn detail(&self, message: &StoredMessage) -> MessageDetail {
        MessageDetail {
            id: message.id,
            body: message.body.clone(),
            sent_at: message.sent_at,
            read_at: message.read_at,
            from_user: self.summary(&message.from_username),
            to_user: self.summary(&message.to_username),
        }
    }

    fn matching(&self, keep: impl Fn(&StoredMessage) -> bool) -> Vec<MessageDetail> {
        let found: Vec<StoredMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| keep(*m))
            .cloned()
            .collect();
        found.iter().map(|m| self.detail(m)).collect()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn get(&self, id: i32) -> AppResult<MessageDetail> {
        let found = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned();

        found
            .map(|m| self.detail(&m))
            .ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))
    }

    async fn create(&self, from_username: &str, to_username: &str, body: &str) -> AppResult<Message> {
        {
            let users = self.users.lock().unwrap();
            for username in [from_username, to_username] {
                if !users.contains_key(username) {
                    return Err(AppError::NotFound(format!("No such user: {}", username)));
                }
            }
        }

        let mut messages = self.messages.lock().unwrap();
        let stored = StoredMessage {
            id: messages.len() as i32 + 1,
            from_username: from_username.to_string(),
            to_username: to_username.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
            read_at: None,
        };
        messages.push(stored.clone());

        Ok(Message {
            id: stored.id,
            from_username: stored.from_username,
            to_username: stored.to_username,
            body: stored.body,
            sent_at: stored.sent_at,
        })
    }

    async fn mark_read(&self, id: i32) -> AppResult<ReadReceipt> {
        let mut messages = self.messages.lock().unwrap();
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))?;

        let read_at = *message.read_at.get_or_insert_with(Utc::now);
        Ok(ReadReceipt { id, read_at })
    }

    async fn sent_by(&self, username: &str) -> AppResult<Vec<MessageDetail>> {
        Ok(self.matching(|m| m.from_username == username))
    }

    async fn received_by(&self, username: &str) -> AppResult<Vec<MessageDetail>> {
        Ok(self.matching(|m| m.to_username == username))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn register(&self, data: &RegisterData, hashed_password: &str) -> AppResult<UserSummary> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&data.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let detail = UserDetail {
            username: data.username.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            phone: data.phone.clone(),
            join_at: Utc::now(),
            last_login_at: None,
        };
        users.insert(
            data.username.clone(),
            StoredUser {
                detail,
                password: hashed_password.to_string(),
            },
        );

        Ok(UserSummary {
            username: data.username.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            phone: data.phone.clone(),
        })
    }

    async fn password_hash(&self, username: &str) -> AppResult<Option<String>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(username).map(|u| u.password.clone()))
    }

    async fn update_login_timestamp(&self, username: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("No such user: {}", username)))?;
        user.detail.last_login_at = Some(Utc::now());
        Ok(())
    }

    async fn get(&self, username: &str) -> AppResult<UserDetail> {
        let users = self.users.lock().unwrap();
        users
            .get(username)
            .map(|u| u.detail.clone())
            .ok_or_else(|| AppError::NotFound(format!("No such user: {}", username)))
    }

    async fn all(&self) -> AppResult<Vec<UserSummary>> {
        let users = self.users.lock().unwrap();
        let mut all: Vec<UserSummary> = users
            .values()
            .map(|u| UserSummary {
                username: u.detail.username.clone(),
                first_name: u.detail.first_name.clone(),
                last_name: u.detail.last_name.clone(),
                phone: u.detail.phone.clone(),
            })
            .collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(all)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserSummary;

/// A message as stored, returned right after it is sent
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i32,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// A message joined with both participants' profiles
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageDetail {
    pub id: i32,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

impl MessageDetail {
    pub fn from_username(&self) -> &str {
        &self.from_user.username
    }

    pub fn to_username(&self) -> &str {
        &self.to_user.username
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReadReceipt {
    pub id: i32,
    pub read_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Recipient username is required"))]
    pub to_username: String,
    #[validate(length(min = 1, message = "Message body cannot be empty"))]
    pub body: String,
}

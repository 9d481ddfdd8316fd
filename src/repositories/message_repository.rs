// repositories/message_repository.rs

use async_trait::async_trait;
use deadpool_postgres::Pool;
use std::sync::Arc;
use tokio_postgres::{error::SqlState, Row};

use super::MessageStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        message::{Message, MessageDetail, ReadReceipt},
        user::UserSummary,
    },
};

const DETAIL_COLUMNS: &str = "
    SELECT m.id, m.body, m.sent_at, m.read_at,
           f.username, f.first_name, f.last_name, f.phone,
           t.username, t.first_name, t.last_name, t.phone
    FROM messages m
    JOIN users f ON m.from_username = f.username
    JOIN users t ON m.to_username = t.username
";

// Named in database/migrations.rs; also Postgres' default name for the column
pub(crate) const FROM_USER_CONSTRAINT: &str = "messages_from_username_fkey";
pub(crate) const TO_USER_CONSTRAINT: &str = "messages_to_username_fkey";

pub struct MessageRepository {
    pool: Arc<Pool>,
}

impl MessageRepository {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    async fn details_where(&self, filter: &str, username: &str) -> AppResult<Vec<MessageDetail>> {
        let client = self.pool.get().await?;
        // `filter` is always one of our own column names, never user input
        let query = format!("{} WHERE {} = $1 ORDER BY m.sent_at, m.id", DETAIL_COLUMNS, filter);
        let rows = client.query(query.as_str(), &[&username]).await?;

        Ok(rows.iter().map(detail_from_row).collect())
    }
}

/// Picks the username behind a failed foreign key on `messages`.
/// Anything but the sender's constraint is blamed on the recipient.
fn missing_user<'a>(constraint: Option<&str>, from_username: &'a str, to_username: &'a str) -> &'a str {
    match constraint {
        Some(FROM_USER_CONSTRAINT) => from_username,
        _ => to_username,
    }
}

fn detail_from_row(row: &Row) -> MessageDetail {
    MessageDetail {
        id: row.get(0),
        body: row.get(1),
        sent_at: row.get(2),
        read_at: row.get(3),
        from_user: UserSummary {
            username: row.get(4),
            first_name: row.get(5),
            last_name: row.get(6),
            phone: row.get(7),
        },
        to_user: UserSummary {
            username: row.get(8),
            first_name: row.get(9),
            last_name: row.get(10),
            phone: row.get(11),
        },
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn get(&self, id: i32) -> AppResult<MessageDetail> {
        let client = self.pool.get().await?;
        let query = format!("{} WHERE m.id = $1", DETAIL_COLUMNS);
        let row = client
            .query_opt(query.as_str(), &[&id])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))?;

        Ok(detail_from_row(&row))
    }

    async fn create(&self, from_username: &str, to_username: &str, body: &str) -> AppResult<Message> {
        let client = self.pool.get().await?;
        let query = "
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, from_username, to_username, body, sent_at
        ";

        let row = client
            .query_one(query, &[&from_username, &to_username, &body])
            .await
            .map_err(|e| match e.code() {
                Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
                    // Either side of the message may be the missing user
                    let constraint = e.as_db_error().and_then(|db| db.constraint());
                    let missing = missing_user(constraint, from_username, to_username);
                    AppError::NotFound(format!("No such user: {}", missing))
                }
                _ => AppError::Database(e),
            })?;

        Ok(Message {
            id: row.get(0),
            from_username: row.get(1),
            to_username: row.get(2),
            body: row.get(3),
            sent_at: row.get(4),
        })
    }

    async fn mark_read(&self, id: i32) -> AppResult<ReadReceipt> {
        let client = self.pool.get().await?;
        let query = "
            UPDATE messages
            SET read_at = COALESCE(read_at, NOW()) -- first read wins
            WHERE id = $1
            RETURNING id, read_at
        ";
        let row = client
            .query_opt(query, &[&id])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No such message: {}", id)))?;

        Ok(ReadReceipt {
            id: row.get(0),
            read_at: row.get(1),
        })
    }

    async fn sent_by(&self, username: &str) -> AppResult<Vec<MessageDetail>> {
        self.details_where("m.from_username", username).await
    }

    async fn received_by(&self, username: &str) -> AppResult<Vec<MessageDetail>> {
        self.details_where("m.to_username", username).await
    }
}

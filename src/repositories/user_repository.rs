// repositories/user_repository.rs

use async_trait::async_trait;
use deadpool_postgres::Pool;
use std::sync::Arc;
use tokio_postgres::error::SqlState;

use super::UserStore;
use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterData, UserDetail, UserSummary},
};

pub struct UserRepository {
    pool: Arc<Pool>,
}

impl UserRepository {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Creates a new user in the database
    async fn register(&self, data: &RegisterData, hashed_password: &str) -> AppResult<UserSummary> {
        let client = self.pool.get().await?;
        let query = "
            INSERT INTO users (username, password, first_name, last_name, phone, join_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING username, first_name, last_name, phone
        ";

        let row = client
            .query_one(
                query,
                &[&data.username, &hashed_password, &data.first_name, &data.last_name, &data.phone],
            )
            .await
            .map_err(|e| match e.code() {
                Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                    AppError::Conflict("Username already exists".to_string())
                }
                _ => AppError::Database(e),
            })?;

        Ok(UserSummary {
            username: row.get(0),
            first_name: row.get(1),
            last_name: row.get(2),
            phone: row.get(3),
        })
    }

    /// Gets the stored bcrypt hash for authentication
    async fn password_hash(&self, username: &str) -> AppResult<Option<String>> {
        let client = self.pool.get().await?;
        let query = "SELECT password FROM users WHERE username = $1";
        let row = client.query_opt(query, &[&username]).await?;

        Ok(row.map(|row| row.get(0)))
    }

    async fn update_login_timestamp(&self, username: &str) -> AppResult<()> {
        let client = self.pool.get().await?;
        let query = "UPDATE users SET last_login_at = NOW() WHERE username = $1";
        let updated = client.execute(query, &[&username]).await?;

        if updated == 0 {
            return Err(AppError::NotFound(format!("No such user: {}", username)));
        }
        Ok(())
    }

    async fn get(&self, username: &str) -> AppResult<UserDetail> {
        let client = self.pool.get().await?;
        let query = "
            SELECT username, first_name, last_name, phone, join_at, last_login_at
            FROM users
            WHERE username = $1
        ";
        let row = client
            .query_opt(query, &[&username])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No such user: {}", username)))?;

        Ok(UserDetail {
            username: row.get(0),
            first_name: row.get(1),
            last_name: row.get(2),
            phone: row.get(3),
            join_at: row.get(4),
            last_login_at: row.get(5),
        })
    }

    async fn all(&self) -> AppResult<Vec<UserSummary>> {
        let client = self.pool.get().await?;
        let query = "SELECT username, first_name, last_name, phone FROM users ORDER BY username";
        let rows = client.query(query, &[]).await?;

        Ok(rows
            .iter()
            .map(|row| UserSummary {
                username: row.get(0),
                first_name: row.get(1),
                last_name: row.get(2),
                phone: row.get(3),
            })
            .collect())
    }
}

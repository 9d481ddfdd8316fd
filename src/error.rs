use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure a request can end in
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Identity =====
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Unauthorized")]
    WrongUser,

    #[error("Invalid username/password")]
    InvalidCredentials,

    // ===== Message access =====
    #[error("User not associated with requested message")]
    NotParticipant,

    /// Rendered exactly like a missing message.
    #[error("No such message: {0}")]
    NotRecipient(i32),

    // ===== Lookups & input =====
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Body or path segment that could not be parsed at all
    #[error("Bad request: {0}")]
    BadRequest(String),

    // ===== Infrastructure =====
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::WrongUser | AppError::NotParticipant => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotRecipient(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Token(_)
            | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client; infrastructure details stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Pool(_) => "Database error".to_string(),
            AppError::Token(_) | AppError::PasswordHash(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

// Extractor rejections get the same JSON envelope as every other failure
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": self.user_message(),
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

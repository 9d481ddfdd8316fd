use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::{error::AppResult, models::user::Claims};

/// Issues and verifies the bearer tokens that carry a caller's username
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    ttl_hours: i64,
}

impl JwtService {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }

    // Generates a JWT for the user, valid for the configured number of hours.
    pub fn create_jwt(&self, username: &str) -> AppResult<String> {
        let claims = Claims {
            sub: username.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(self.ttl_hours)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    // Validates the provided JWT and returns the username if valid.
    pub fn validate_token(&self, token: &str) -> Option<String> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                debug!("Rejected JWT: {}", e);
                None
            }
        }
    }
}

//! Domain service for authentication.
//!
//! Handles sign-in, token refresh and bearer token validation.

use thiserror::Error;

use crate::models::{AccountCredentialsVo, TokenVo};
use crate::services::token_provider::{Claims, TokenError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing user name, password or token")]
    MissingCredentials,

    #[error("Invalid username/password supplied")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] for absent or blank input and
    /// [`AuthError::InvalidCredentials`] for unknown users, inactive accounts
    /// or a wrong password.
    async fn signin(&self, credentials: Option<AccountCredentialsVo>)
    -> Result<TokenVo, AuthError>;

    /// Issues a new token pair from a refresh token belonging to `username`.
    async fn refresh_token(&self, username: &str, refresh_token: &str)
    -> Result<TokenVo, AuthError>;

    /// Validates a bearer access token.
    fn authenticate(&self, token: &str) -> Result<Claims, AuthError>;
}

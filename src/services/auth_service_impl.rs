//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::Store;
use crate::models::{AccountCredentialsVo, TokenVo};
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::token_provider::{Claims, TokenProvider};

pub struct SeaOrmAuthService {
    store: Store,
    tokens: Arc<TokenProvider>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: Arc<TokenProvider>) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signin(
        &self,
        credentials: Option<AccountCredentialsVo>,
    ) -> Result<TokenVo, AuthError> {
        let credentials = credentials
            .filter(|c| !c.is_blank())
            .ok_or(AuthError::MissingCredentials)?;
        let username = credentials.user_name.trim();

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active() {
            warn!(user = %username, "Sign-in attempt for inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let is_valid = self
            .store
            .verify_user_password(username, &credentials.password)
            .await?;

        if !is_valid {
            warn!(user = %username, "Sign-in rejected: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.create_access_token(&user.username, &user.roles)?;
        info!(user = %user.username, "User signed in");
        Ok(token)
    }

    async fn refresh_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<TokenVo, AuthError> {
        if username.trim().is_empty() || refresh_token.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        if !user.is_active() {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.refresh_token(refresh_token)?;
        if token.username != user.username {
            warn!(user = %username, "Refresh token issued to another subject");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(token)
    }

    fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.tokens.validate_access_token(token)?)
    }
}

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::{permission, prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub enabled: bool,
}

impl User {
    fn from_model(model: users::Model, roles: Vec<String>) -> Self {
        Self {
            id: model.id,
            username: model.user_name,
            full_name: model.full_name,
            roles,
            account_non_expired: model.account_non_expired,
            account_non_locked: model.account_non_locked,
            credentials_non_expired: model.credentials_non_expired,
            enabled: model.enabled,
        }
    }

    /// All four account flags must hold before the user may sign in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.account_non_expired
            && self.account_non_locked
            && self.credentials_non_expired
            && self.enabled
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_model(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::UserName.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    /// Get user by username, roles included
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(model) = self.find_model(username).await? else {
            return Ok(None);
        };

        let roles = model
            .find_related(Permission)
            .order_by_asc(permission::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query user permissions")?
            .into_iter()
            .map(|p| p.description)
            .collect();

        Ok(Some(User::from_model(model, roles)))
    }

    /// Verify password for a user
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        let Some(user) = self.find_model(username).await? else {
            return Ok(false);
        };

        let password_hash = user.password;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_uses_configured_params() {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };
        let hash = hash_password("admin1234", Some(&config)).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=1024,t=1,p=1"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"admin1234", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn inactive_when_any_flag_cleared() {
        let mut user = User {
            id: 1,
            username: "alison".to_string(),
            full_name: "Alison Silva".to_string(),
            roles: vec!["ADMIN".to_string()],
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            enabled: true,
        };
        assert!(user.is_active());

        user.account_non_locked = false;
        assert!(!user.is_active());
    }
}

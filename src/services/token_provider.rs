//! Issues and validates the HS256 access and refresh tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::models::TokenVo;

/// Refresh tokens outlive access tokens by this factor.
const REFRESH_VALIDITY_FACTOR: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub token_use: TokenUse,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Expired or invalid token")]
    Invalid,

    #[error("Token is not a {0:?} token")]
    WrongUse(TokenUse),
}

pub struct TokenProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    validity: Duration,
}

impl TokenProvider {
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let validity_ms = i64::try_from(config.access_token_validity_ms).unwrap_or(i64::MAX);
        Self::with_validity(
            &config.jwt_secret,
            &config.jwt_issuer,
            Duration::milliseconds(validity_ms),
        )
    }

    #[must_use]
    pub fn with_validity(secret: &str, issuer: &str, validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            validity,
        }
    }

    /// Issues a fresh access/refresh pair for `username`.
    pub fn create_access_token(
        &self,
        username: &str,
        roles: &[String],
    ) -> Result<TokenVo, TokenError> {
        let now = Utc::now();
        let expiration = now + self.validity;
        let refresh_expiration = now + self.validity * REFRESH_VALIDITY_FACTOR;

        let access_token = self.sign(username, roles, now, expiration, TokenUse::Access)?;
        let refresh_token =
            self.sign(username, roles, now, refresh_expiration, TokenUse::Refresh)?;

        Ok(TokenVo {
            username: username.to_string(),
            authenticated: true,
            created: now,
            expiration,
            access_token,
            refresh_token,
        })
    }

    /// Validates a refresh token and issues a new pair for its subject.
    pub fn refresh_token(&self, refresh_token: &str) -> Result<TokenVo, TokenError> {
        let claims = self.decode(strip_bearer(refresh_token), TokenUse::Refresh)?;
        self.create_access_token(&claims.sub, &claims.roles)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode(strip_bearer(token), TokenUse::Access)
    }

    pub fn decode(&self, token: &str, expected: TokenUse) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.token_use != expected {
            return Err(TokenError::WrongUse(expected));
        }

        Ok(data.claims)
    }

    fn sign(
        &self,
        username: &str,
        roles: &[String],
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        token_use: TokenUse,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: username.to_string(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            token_use,
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }
}

/// Removes an optional `Bearer ` prefix.
#[must_use]
pub fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TokenProvider {
        TokenProvider::with_validity("test-secret", "restapi", Duration::minutes(10))
    }

    fn roles() -> Vec<String> {
        vec!["ADMIN".to_string(), "MANAGER".to_string()]
    }

    #[test]
    fn access_token_round_trip() {
        let provider = provider();
        let token = provider.create_access_token("alison", &roles()).unwrap();
        assert!(token.authenticated);
        assert!(token.expiration > token.created);

        let claims = provider
            .validate_access_token(&format!("Bearer {}", token.access_token))
            .unwrap();
        assert_eq!(claims.sub, "alison");
        assert_eq!(claims.roles, roles());
        assert_eq!(claims.iss, "restapi");
        assert_eq!(claims.token_use, TokenUse::Access);
    }

    #[test]
    fn refresh_outlives_access() {
        let provider = provider();
        let token = provider.create_access_token("alison", &roles()).unwrap();
        let access = provider.decode(&token.access_token, TokenUse::Access).unwrap();
        let refresh = provider.decode(&token.refresh_token, TokenUse::Refresh).unwrap();
        assert_eq!(refresh.exp - refresh.iat, 3 * (access.exp - access.iat));
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let provider = provider();
        let token = provider.create_access_token("alison", &roles()).unwrap();

        assert!(matches!(
            provider.validate_access_token(&token.refresh_token),
            Err(TokenError::WrongUse(TokenUse::Access))
        ));
        assert!(provider.refresh_token(&token.access_token).is_err());

        let refreshed = provider.refresh_token(&token.refresh_token).unwrap();
        assert_eq!(refreshed.username, "alison");
        assert!(provider.validate_access_token(&refreshed.access_token).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = TokenProvider::with_validity("test-secret", "restapi", Duration::minutes(-10));
        let token = expired.create_access_token("alison", &roles()).unwrap();
        assert!(matches!(
            provider().validate_access_token(&token.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = TokenProvider::with_validity("other-secret", "restapi", Duration::minutes(10));
        let token = other.create_access_token("alison", &roles()).unwrap();
        assert!(provider().validate_access_token(&token.access_token).is_err());
        assert!(provider().validate_access_token("not-a-jwt").is_err());
    }

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(strip_bearer("Bearer abc"), "abc");
        assert_eq!(strip_bearer("abc"), "abc");
        assert_eq!(strip_bearer("  Bearer  abc "), "abc");
    }
}

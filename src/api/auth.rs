use axum::{
    extract::{Path, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::negotiate::{Accepts, Negotiated, Payload};
use super::{ApiError, AppState};
use crate::models::{AccountCredentialsVo, TokenVo};
use crate::services::AuthError;

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials
            | AuthError::InvalidCredentials
            | AuthError::UserNotFound(_)
            | AuthError::Token(_) => {
                tracing::debug!(error = %err, "Authentication request rejected");
                Self::invalid_client_request()
            }
            AuthError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <access token>` on every protected route.
/// The validated claims are stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(request.headers()) else {
        return ApiError::access_denied().into_response();
    };

    match state.shared.auth_service.authenticate(token) {
        Ok(claims) => {
            tracing::Span::current().record("user_id", claims.sub.as_str());
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::access_denied().into_response()
        }
    }
}

/// Unmatched paths deny unauthenticated callers like protected routes do,
/// and answer 404 only once a valid access token is presented.
pub async fn fallback(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiError {
    let authenticated = extract_bearer(&headers)
        .is_some_and(|token| state.shared.auth_service.authenticate(token).is_ok());

    if authenticated {
        ApiError::NotFound("No resource found for this path".to_string())
    } else {
        ApiError::access_denied()
    }
}

/// Authorization header value, `Bearer ` prefix included or not.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signin
/// Authenticates a user and returns an access/refresh token pair
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Payload(credentials): Payload<AccountCredentialsVo>,
) -> Result<Negotiated<TokenVo>, ApiError> {
    let token = state.shared.auth_service.signin(credentials).await?;
    Ok(Negotiated::ok(media_type, token))
}

/// PUT /auth/refresh/{username}
/// Exchanges the refresh token in the Authorization header for a new pair
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Negotiated<TokenVo>, ApiError> {
    let refresh_token = extract_bearer(&headers).ok_or_else(ApiError::invalid_client_request)?;

    let token = state
        .shared
        .auth_service
        .refresh_token(&username, refresh_token)
        .await?;
    Ok(Negotiated::ok(media_type, token))
}

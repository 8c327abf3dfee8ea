//! Caller authentication
//!
//! Every command and event route requires `Authorization: Bearer <jwt>`
//! signed with the configured HS256 secret. The `sub` claim is the caller's
//! uid (the staff id for staff clients).

use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for callers
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Caller uid
    pub sub: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller extracted from the bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub uid: String,
}

const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Create a caller token
pub fn create_token(uid: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: uid.to_string(),
        exp: (now + chrono::Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a caller token
pub fn verify_token(token: &str, secret: &str) -> Result<Caller, AppError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    if data.claims.sub.is_empty() {
        return Err(AppError::invalid_token("Token has no subject"));
    }
    Ok(Caller {
        uid: data.claims.sub,
    })
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(caller.clone());
        }

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!(uri = %parts.uri, "Missing Authorization header");
                AppError::not_authenticated()
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

        let caller = verify_token(token, &state.config.jwt_secret).inspect_err(|e| {
            tracing::warn!(uri = %parts.uri, error = %e, "Caller authentication failed");
        })?;

        parts.extensions.insert(caller.clone());
        Ok(caller)
    }
}

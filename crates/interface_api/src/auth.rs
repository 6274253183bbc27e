//! Bearer token authentication
//!
//! A token's subject is the caller's principal id. Roles are not carried in
//! the token: whether a principal is the insurer or a reviewer is decided by
//! the engine's role directory on every operation.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::PrincipalId;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (principal id)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl TokenClaims {
    /// Parses the subject as a principal
    pub fn principal(&self) -> Result<PrincipalId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidSubject)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject is not a principal id")]
    InvalidSubject,
}

/// Creates a token for `principal`
///
/// # Arguments
///
/// * `principal` - The caller the token identifies
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(principal: PrincipalId, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = i64::try_from(expiration_secs).unwrap_or(i64::MAX).min(i64::from(u32::MAX));
    let exp = now + Duration::seconds(ttl);

    let claims = TokenClaims {
        sub: principal.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Validates a token and returns the principal it identifies
pub fn authenticate(token: &str, secret: &str) -> Result<PrincipalId, AuthError> {
    validate_token(token, secret)?.principal()
}

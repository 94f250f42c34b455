//! Resolves a request's `Authorization` header to a stored user.
//!
//! Every failure (no header, wrong scheme, bad signature, expired token, unknown subject)
//! collapses into `AppError::Unauthenticated`; the specific reason only reaches the debug log.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{
    auth::token::TokenService,
    error::AppError,
    models::User,
    repository::users,
};

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AppError> {
    let value = authorization.ok_or_else(|| reject("missing Authorization header"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| reject("malformed Authorization header"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(reject("non-bearer authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(reject("empty bearer token"));
    }
    Ok(token)
}

/// Extracts and validates the token, returning the subject id it was issued for.
pub fn authenticate(
    tokens: &TokenService,
    authorization: Option<&str>,
    now: DateTime<Utc>,
) -> Result<i64, AppError> {
    let token = bearer_token(authorization)?;
    tokens
        .validate(token, now)
        .map_err(|e| reject(&e.to_string()))
}

/// Looks up the subject of a validated token. A deleted user is treated like a bad token.
pub async fn resolve_subject(conn: &mut SqliteConnection, subject: i64) -> Result<User, AppError> {
    users::find_by_id(conn, subject)
        .await?
        .ok_or_else(|| reject(&format!("subject {} no longer exists", subject)))
}

/// Full resolution: header, token, then user.
pub async fn resolve(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    authorization: Option<&str>,
    now: DateTime<Utc>,
) -> Result<User, AppError> {
    let subject = authenticate(tokens, authorization, now)?;
    resolve_subject(conn, subject).await
}

fn reject(reason: &str) -> AppError {
    log::debug!("rejecting request credentials: {}", reason);
    AppError::Unauthenticated
}

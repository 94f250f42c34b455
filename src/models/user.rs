use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Registration payload. No password policy is imposed; the email is only normalised.
#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub email: String,
    pub password: String, // plaintext, only ever hashed
}

/// Public view of a user returned by `/auth/register`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRead {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Canonical form of a login handle: trimmed and ASCII-lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

use sqlx::{Connection, SqliteConnection};

use crate::{error::AppError, models::User};

/// Inserts a new user. `email` must already be normalised.
///
/// The lookup beforehand is only a fast path; the unique index on `users.email` decides
/// concurrent registrations, and its violation is reported as `DuplicateEmail` as well.
pub async fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    hashed_password: &str,
) -> Result<User, AppError> {
    if find_by_email(conn, email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }
    insert_user(conn, email, hashed_password).await
}

async fn insert_user(
    conn: &mut SqliteConnection,
    email: &str,
    hashed_password: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hashed_password) VALUES ($1, $2)
         RETURNING id, email, hashed_password",
    )
    .bind(email)
    .bind(hashed_password)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateEmail,
        other => AppError::Database(other),
    })
}

pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, hashed_password FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, hashed_password FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}

/// Removes a user and every task they own in one transaction.
///
/// Returns `false` when no such user exists.
pub async fn delete_user(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
    let mut tx = conn.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE owner_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}

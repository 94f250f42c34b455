use sqlx::SqliteConnection;

use crate::{
    error::AppError,
    models::{Task, TaskCreate, TaskUpdate},
};

const TASK_COLUMNS: &str = "id, title, description, completed, owner_id";

pub async fn create(
    conn: &mut SqliteConnection,
    owner_id: i64,
    input: TaskCreate,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, completed, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(input.title)
    .bind(input.description.unwrap_or_default())
    .bind(input.completed.unwrap_or(false))
    .bind(owner_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(task)
}

/// Lists the owner's tasks in id order.
pub async fn list(
    conn: &mut SqliteConnection,
    owner_id: i64,
    skip: u32,
    limit: u32,
) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1
         ORDER BY id ASC LIMIT $2 OFFSET $3"
    ))
    .bind(owner_id)
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(&mut *conn)
    .await?;
    Ok(tasks)
}

/// A task owned by someone else is reported exactly like a missing one.
pub async fn get_by_id(
    conn: &mut SqliteConnection,
    owner_id: i64,
    task_id: i64,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2"
    ))
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(task)
}

/// Applies the fields present in `changes`; absent fields keep their stored values.
pub async fn update(
    conn: &mut SqliteConnection,
    owner_id: i64,
    task_id: i64,
    changes: TaskUpdate,
) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             completed = COALESCE($3, completed)
         WHERE id = $4 AND owner_id = $5
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.completed)
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(AppError::task_not_found)
}

pub async fn delete(conn: &mut SqliteConnection, owner_id: i64, task_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::task_not_found());
    }
    Ok(())
}

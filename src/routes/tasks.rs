use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TaskCreate, TaskQuery, TaskUpdate},
    repository::tasks,
};
use actix_web::{delete, get, post, put, routes, web, HttpResponse};
use sqlx::SqlitePool;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `skip` (optional, default 0): number of tasks to skip.
/// - `limit` (optional, default 100): maximum number of tasks returned.
///
/// Tasks are ordered by id, oldest first.
#[routes]
#[get("")]
#[get("/")]
pub async fn get_tasks(
    pool: web::Data<SqlitePool>,
    user: CurrentUser,
    query_params: web::Query<TaskQuery>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let tasks = tasks::list(
        &mut conn,
        user.id(),
        query_params.skip(),
        query_params.limit(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner always comes from the resolved identity, never from the payload.
/// Omitted `description` defaults to `""` and omitted `completed` to `false`.
#[routes]
#[post("")]
#[post("/")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    user: CurrentUser,
    task_data: web::Json<TaskCreate>,
) -> Result<HttpResponse, AppError> {
    task_data.validate()?;

    let mut conn = pool.acquire().await?;
    let task = tasks::create(&mut conn, user.id(), task_data.into_inner()).await?;
    log::debug!("user {} created task {}", user.id(), task.id);

    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: the task does not exist or belongs to someone else.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<SqlitePool>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let task = tasks::get_by_id(&mut conn, user.id(), task_id.into_inner())
        .await?
        .ok_or_else(AppError::task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Fields left out of the body are not touched.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    user: CurrentUser,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
) -> Result<HttpResponse, AppError> {
    task_data.validate()?;

    let mut conn = pool.acquire().await?;
    let task = tasks::update(&mut conn, user.id(), task_id.into_inner(), task_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task permanently. Responds `204 No Content`.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    user: CurrentUser,
    task_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    tasks::delete(&mut conn, user.id(), task_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

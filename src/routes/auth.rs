use crate::{
    auth::{LoginRequest, PasswordHasher, TokenResponse, TokenService},
    error::AppError,
    models::{normalize_email, UserInput, UserRead},
    repository::users,
};
use actix_web::{post, web, Either, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

/// Register a new user
///
/// Creates an account and returns its public view. Responds 400 when the email is taken.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    passwords: web::Data<PasswordHasher>,
    register_data: web::Json<UserInput>,
) -> Result<HttpResponse, AppError> {
    let UserInput { email, password } = register_data.into_inner();
    let email = normalize_email(&email);

    let mut conn = pool.acquire().await?;
    // Fail fast before paying for the hash; `create_user` still enforces uniqueness.
    if users::find_by_email(&mut conn, &email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let hasher = **passwords;
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    let user = users::create_user(&mut conn, &email, &password_hash).await?;
    log::info!("registered user {}", user.id);

    Ok(HttpResponse::Ok().json(UserRead::from(user)))
}

/// Login user
///
/// Verifies the email/password pair and issues a bearer token. Unknown emails and wrong
/// passwords produce the same 400 response.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    passwords: web::Data<PasswordHasher>,
    tokens: web::Data<TokenService>,
    login_data: Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> Result<HttpResponse, AppError> {
    let credentials = login_data.into_inner();
    credentials.validate()?;
    let LoginRequest { username, password } = credentials;
    let email = normalize_email(&username);

    let user = {
        let mut conn = pool.acquire().await?;
        users::find_by_email(&mut conn, &email).await?
    };
    let user = match user {
        Some(user) => user,
        None => {
            log::debug!("login rejected: unknown account");
            return Err(AppError::InvalidCredentials);
        }
    };

    let hasher = **passwords;
    let stored_hash = user.hashed_password.clone();
    if !web::block(move || hasher.verify(&password, &stored_hash)).await?? {
        log::debug!("login rejected for user {}: wrong password", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens
        .issue(user.id, Utc::now())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    log::info!("issued access token for user {}", user.id);

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

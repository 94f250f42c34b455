#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    test, App,
};
use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde_json::json;
use task_api::{
    auth::{PasswordHasher, TokenResponse, TokenService},
    config::JwtSettings,
    db, AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: TEST_SECRET.to_string(),
        algorithm: Algorithm::HS256,
        access_token_ttl: Duration::minutes(60),
    }
}

/// Fresh in-memory store plus services; bcrypt runs at its lowest cost.
pub async fn test_state() -> AppState {
    let pool = db::memory_pool()
        .await
        .expect("Failed to open in-memory database");
    AppState::new(pool, TokenService::new(&jwt_settings()), PasswordHasher::new(4))
}

pub async fn init_app(
    state: &AppState,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(App::new().configure(|cfg| state.configure(cfg))).await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers `email` and logs in, returning the access token.
pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "Failed to register {}: {}",
        email,
        resp.status()
    );

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "username": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "Failed to log in {}: {}",
        email,
        resp.status()
    );
    let body: TokenResponse = test::read_body_json(resp).await;
    body.access_token
}

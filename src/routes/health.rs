use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

/// Health check endpoint
///
/// Reports whether the service can still reach its store.
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "database": "ok"
        })),
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "database": "unavailable"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let pool = memory_pool().await.unwrap();
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(pool))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");
    }

    #[actix_web::test]
    async fn test_health_reports_closed_pool() {
        let pool = memory_pool().await.unwrap();
        pool.close().await;
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(pool))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}

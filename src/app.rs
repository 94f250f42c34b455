use actix_web::web;
use sqlx::SqlitePool;

use crate::{
    auth::{PasswordHasher, TokenService},
    config::Config,
    routes,
};

/// Shared, read-only state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    tokens: web::Data<TokenService>,
    passwords: web::Data<PasswordHasher>,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenService, passwords: PasswordHasher) -> Self {
        Self {
            pool,
            tokens: web::Data::new(tokens),
            passwords: web::Data::new(passwords),
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        Self::new(
            pool,
            TokenService::new(&config.jwt),
            PasswordHasher::new(config.bcrypt_cost),
        )
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Registers the state and every route on an `App`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(self.tokens.clone())
            .app_data(self.passwords.clone());
        routes::config(cfg);
    }
}

#![doc = "The `task_api` library crate."]
#![doc = ""]
#![doc = "Authentication (password hashing, bearer tokens, request guard), owner-scoped task"]
#![doc = "persistence, routing and error handling for the task-list service. The binary"]
#![doc = "(`main.rs`) only loads configuration and runs the server."]

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

pub use app::AppState;
pub use config::Config;
pub use error::AppError;

use crate::error::AppError;
use bcrypt::{hash, verify};

/// Salted, adaptive-cost password hashing backed by bcrypt.
///
/// bcrypt embeds the salt and cost in the hash string, so `verify` needs nothing but the
/// stored hash. Both operations are CPU-bound; handlers run them through `web::block`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AppError> {
        verify(password, hashed_password)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }
}

//! Hash y verificación de passwords con bcrypt

use bcrypt::{hash, verify};

use crate::utils::errors::AppError;

/// Coste de bcrypt (10 rondas de sal)
pub const BCRYPT_COST: u32 = 10;

/// Hash del password; se ejecuta fuera del runtime async porque bcrypt es costoso
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

/// Verificar un password contra su hash
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))
}

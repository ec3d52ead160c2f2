use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{AppError, AppResult};

fn internal(context: &'static str, e: argon2::password_hash::Error) -> AppError {
    error!(error = %e, "{context}");
    AppError::Internal(anyhow::anyhow!("{context}: {e}"))
}

/// Argon2id PHC string with a fresh random salt embedded.
pub fn hash_password(plain: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| internal("password hashing failed", e))
}

/// `Ok(false)` on mismatch; an unparseable stored hash is an internal error.
pub fn verify_password(plain: &str, stored: &str) -> AppResult<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| internal("stored password hash unreadable", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

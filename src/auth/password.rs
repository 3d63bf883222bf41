use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Salted one-way hash of a plaintext password. Fails only when the
/// underlying randomness or resources give out, which is fatal to the
/// calling request.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::from)
}

/// True iff the plaintext re-hashes to the stored value. bcrypt performs
/// the comparison in constant time; a mismatch is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password).map_err(AppError::from)
}

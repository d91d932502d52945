// src/utils/hash.rs

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Stands in for the stored hash of an unknown username, so a failed login
/// costs one Argon2 verification either way.
static DECOY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_password("decoy-password").ok());

fn internal(err: argon2::password_hash::Error) -> AppError {
    AppError::InternalServerError(format!("password hashing: {}", err))
}

/// Hashes a new account password into a PHC string (`$argon2id$...`).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(internal)
}

/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(internal)?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Checks a login attempt against the stored hash of the named account.
///
/// `stored` is `None` when no such account exists. Unknown usernames and
/// wrong passwords both come back as the same 401.
pub fn check_credentials(password: &str, stored: Option<&str>) -> Result<(), AppError> {
    let matched = match stored {
        Some(hash) => verify_password(password, hash)?,
        None => {
            if let Some(decoy) = DECOY_HASH.as_deref() {
                let _ = verify_password(password, decoy);
            }
            false
        }
    };

    if matched {
        Ok(())
    } else {
        Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()))
    }
}

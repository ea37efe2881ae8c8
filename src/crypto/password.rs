//! Account password hashing (Argon2id PHC strings).
//!
//! Only the PHC string (`$argon2id$v=19$...`) is ever stored; it embeds
//! its own salt and parameters so verification needs nothing else.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;

use super::kdf::Argon2Params;
use crate::errors::{CampusVaultError, Result};

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &[u8], params: &Argon2Params) -> Result<String> {
    params.validate()?;

    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CampusVaultError::PasswordHashFailed(format!("salt encoding: {e}")))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| CampusVaultError::PasswordHashFailed(e.to_string()))?,
    );

    argon2
        .hash_password(password, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CampusVaultError::PasswordHashFailed(e.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// A malformed stored hash is treated like a mismatch.
pub fn verify_password(password: &[u8], stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => argon2::Argon2::default()
            .verify_password(password, &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

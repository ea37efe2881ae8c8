//! Passphrase-based key derivation using Argon2id.
//!
//! A message passphrase is never used as key material directly.  It is
//! stretched together with a random per-message salt into a 32-byte
//! AES-256 key.  Parameters come from `Argon2Params` (loaded from
//! `.campusvault.toml` or defaults).

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{CampusVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// The weakest parameters `validate` accepts.  Used by tests.
    pub const fn minimum() -> Self {
        Self {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    /// Reject dangerously weak or malformed settings.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(CampusVaultError::KeyDerivationFailed(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(CampusVaultError::KeyDerivationFailed(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(CampusVaultError::KeyDerivationFailed(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| {
            CampusVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}"))
        })?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// A 32-byte key derived from a passphrase.  Wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PassphraseKey {
    bytes: [u8; KEY_LEN],
}

impl PassphraseKey {
    /// Access the raw key bytes (e.g. to hand to AES-GCM).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive a key from `passphrase` and `salt` with explicit Argon2id params.
///
/// The same passphrase + salt + params always produce the same key.
pub fn derive_passphrase_key(
    passphrase: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<PassphraseKey> {
    params.validate()?;
    let argon2 = params.to_argon2()?;

    let mut key = PassphraseKey {
        bytes: [0u8; KEY_LEN],
    };
    argon2
        .hash_password_into(passphrase, salt, &mut key.bytes)
        .map_err(|e| {
            CampusVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
        })?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        assert!(Argon2Params::default().validate().is_ok());
        assert!(Argon2Params::minimum().validate().is_ok());
    }

    #[test]
    fn low_memory_is_rejected() {
        let params = Argon2Params {
            memory_kib: 1024,
            ..Argon2Params::minimum()
        };
        assert!(matches!(
            params.validate(),
            Err(CampusVaultError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn zero_iterations_or_lanes_are_rejected() {
        let no_iterations = Argon2Params {
            iterations: 0,
            ..Argon2Params::minimum()
        };
        let no_lanes = Argon2Params {
            parallelism: 0,
            ..Argon2Params::minimum()
        };
        assert!(no_iterations.validate().is_err());
        assert!(no_lanes.validate().is_err());
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}

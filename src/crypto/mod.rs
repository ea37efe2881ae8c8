//! Cryptographic primitives for CampusVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id passphrase key derivation (`kdf`)
//! - Argon2id account password hashing (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_passphrase_key, generate_salt, Argon2Params, PassphraseKey};
pub use password::{hash_password, verify_password};
